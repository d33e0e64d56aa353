use std::path::PathBuf;
use std::process::ExitCode;

use clap::{error::ErrorKind, Parser};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use slidereel::{
    composition::render_file,
    config::DEFAULT_SETTINGS_PATH,
    error::{EXIT_OK, EXIT_USAGE},
};

#[derive(Parser)]
#[command(
    name = "render",
    version,
    about = "Render a markdown note into a vertical slideshow video",
    long_about = "Reads a markdown note with YAML front matter, one `# title` line and `- bullet` lines, renders one slide per bullet and encodes them into an mp4 next to the note."
)]
struct Cli {
    /// Markdown note to render
    input: PathBuf,

    /// Style settings file (YAML, or TOML with a .toml extension)
    #[arg(short, long, env = "SLIDEREEL_CONFIG", default_value = DEFAULT_SETTINGS_PATH)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::from(EXIT_OK),
                _ => ExitCode::from(EXIT_USAGE),
            };
        }
    };

    // Initialize logging; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting SlideReel v{}", env!("CARGO_PKG_VERSION"));
    debug!("Input: {:?}", cli.input);
    debug!("Settings: {:?}", cli.config);

    match render_file(&cli.input, &cli.config) {
        Ok(summary) => {
            print!("{}", summary);
            ExitCode::from(EXIT_OK)
        }
        Err(e) => {
            debug!("Render failed: {:?}", e);
            eprintln!("エラー: {}", e.user_message());
            ExitCode::from(e.exit_code())
        }
    }
}
