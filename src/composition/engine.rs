use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{
    config::StyleConfig,
    document::Document,
    error::{Result, SlideError},
    preflight,
    slides::{Slide, SlideCompositor},
    video::{VideoAssembler, VideoParams},
};

/// Outcome of a successful render, printed by the CLI
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    pub title: String,
    pub slide_count: usize,
    /// Seconds
    pub total_duration: f64,
    pub hashtags: Vec<String>,
    pub output_path: PathBuf,
    /// Bytes
    pub file_size: u64,
    pub has_audio: bool,
}

/// The localized summary the CLI prints, one `key: value` line each
impl fmt::Display for RenderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "タイトル: {}", self.title)?;
        writeln!(f, "スライド数: {}枚", self.slide_count)?;
        writeln!(f, "合計時間: {}秒", self.total_duration)?;
        if !self.hashtags.is_empty() {
            writeln!(f, "ハッシュタグ: {}", self.hashtags.join(" "))?;
        }
        if self.has_audio {
            writeln!(f, "BGM: あり")?;
        }
        writeln!(f, "出力: {}", self.output_path.display())
    }
}

/// Runs a parsed document through the compositor and the assembler
///
/// The pipeline is strictly sequential:
/// 1. Slide Composition - one canvas per bullet
/// 2. Video Assembly - timed slides, optional music, ffmpeg encode
pub struct RenderEngine {
    config: StyleConfig,
}

impl RenderEngine {
    pub fn new(config: StyleConfig) -> Self {
        Self { config }
    }

    /// Render one slide per bullet, in document order
    pub fn compose_slides(&self, document: &Document) -> Result<Vec<Slide>> {
        info!("🖼️  Step 1: Composing {} slides...", document.slide_count());

        let compositor = SlideCompositor::new(&self.config)?;
        let slides: Vec<Slide> = document
            .bullets
            .iter()
            .enumerate()
            .map(|(index, bullet)| {
                debug!("   Slide {}: {}", index + 1, bullet);
                compositor.compose(&document.title, bullet)
            })
            .collect();

        info!("   ✅ {} slides at {}x{}", slides.len(), self.config.size.width, self.config.size.height);
        Ok(slides)
    }

    /// Compose and encode `document` into `output_path`
    pub fn render(&self, document: &Document, output_path: &Path) -> Result<RenderSummary> {
        info!("🎬 Rendering \"{}\"", document.title);
        info!("   Output: {:?}", output_path);

        let slides = self.compose_slides(document)?;

        info!("📼 Step 2: Assembling video...");
        let bgm = document.metadata.bgm();
        if let Some(ref path) = bgm {
            debug!("Background music requested: {:?}", path);
        }

        let mut assembler = VideoAssembler::new(VideoParams::default());
        let encoded = assembler.assemble(
            &slides,
            self.config.layout.slide_sec,
            bgm.as_deref(),
            output_path,
        )?;

        info!("🎉 Render complete: {:?}", encoded.path);

        Ok(RenderSummary {
            title: document.title.clone(),
            slide_count: encoded.slide_count,
            total_duration: encoded.duration,
            hashtags: document.metadata.hashtags(),
            output_path: encoded.path,
            file_size: encoded.file_size,
            has_audio: encoded.has_audio,
        })
    }
}

/// Where the video for `input` is written: same path, `.mp4` extension
pub fn output_path_for(input: &Path) -> PathBuf {
    input.with_extension("mp4")
}

/// Full run for one document: input check, settings, parse, preflight, render.
pub fn render_file(input: &Path, settings_path: &Path) -> Result<RenderSummary> {
    if !input.is_file() {
        return Err(SlideError::MissingInputFile {
            path: input.display().to_string(),
        });
    }

    let config = StyleConfig::from_file(settings_path)?;
    config.validate()?;
    debug!("Settings loaded from {:?}", settings_path);

    let document = Document::from_file(input)?;

    let capabilities = preflight::check_capabilities()?;
    debug!("Encoder: {}", capabilities.ffmpeg_version);

    RenderEngine::new(config).render(&document, &output_path_for(input))
}
