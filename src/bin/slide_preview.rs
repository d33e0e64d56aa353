// Render a note's slides to PNG files without encoding a video

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use slidereel::{
    config::{StyleConfig, DEFAULT_SETTINGS_PATH},
    document::Document,
    slides::SlideCompositor,
    video::write_concat_list,
};

#[derive(Parser)]
#[command(name = "slide_preview", version, about = "Render the slides of a note as PNG files")]
struct Cli {
    /// Markdown note to preview
    input: PathBuf,

    /// Style settings file
    #[arg(short, long, env = "SLIDEREEL_CONFIG", default_value = DEFAULT_SETTINGS_PATH)]
    config: PathBuf,

    /// Directory for the PNG files (default: <note>_slides next to the note)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = StyleConfig::from_file(&cli.config)
        .with_context(|| format!("loading settings from {:?}", cli.config))?;
    config.validate()?;

    let document = Document::from_file(&cli.input)
        .with_context(|| format!("reading note {:?}", cli.input))?;

    let out_dir = cli.out_dir.unwrap_or_else(|| {
        let stem = cli
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "note".to_string());
        cli.input.with_file_name(format!("{}_slides", stem))
    });
    std::fs::create_dir_all(&out_dir).with_context(|| format!("creating {:?}", out_dir))?;

    let compositor = SlideCompositor::new(&config)?;
    if compositor.title_uses_builtin_font() || compositor.body_uses_builtin_font() {
        info!("⚠️  Using the built-in bitmap font for at least one face");
    }

    let mut paths = Vec::with_capacity(document.slide_count());
    for (index, bullet) in document.bullets.iter().enumerate() {
        let path = out_dir.join(format!("slide_{:02}.png", index + 1));
        compositor.compose(&document.title, bullet).save_png(&path)?;
        println!("📁 {}", path.display());
        paths.push(path);
    }

    let list_path = out_dir.join("slides.txt");
    write_concat_list(&paths, config.layout.slide_sec, &list_path)?;

    println!(
        "🎞️  {} slides, {}s total, concat list: {}",
        paths.len(),
        config.total_duration(paths.len()),
        list_path.display()
    );
    Ok(())
}
