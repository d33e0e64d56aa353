use std::path::Path;

use image::{imageops::FilterType, Rgb, RgbImage};
use tracing::{debug, warn};

use crate::{
    config::StyleConfig,
    error::{RenderError, Result},
    slides::{color::parse_color, slide::Slide},
    text::{load_font, load_system_font, wrap, FontFace, DEFAULT_MAX_LINES},
};

/// Gap between the title block and the body, as a fraction of the title size
const TITLE_BODY_GAP: f32 = 0.75;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const DEFAULT_INK: Rgb<u8> = Rgb([0x11, 0x11, 0x11]);

/// Which text block a placed line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    Title,
    Body,
}

/// A wrapped line with its top-left position on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub role: LineRole,
    pub text: String,
    pub x: i32,
    pub y: i32,
}

/// Renders one slide per bullet from a style configuration
///
/// The background and both font faces are resolved once in [`SlideCompositor::new`]
/// and reused for every slide.
pub struct SlideCompositor {
    config: StyleConfig,
    background: RgbImage,
    title_font: FontFace,
    body_font: FontFace,
    title_color: Rgb<u8>,
    body_color: Rgb<u8>,
}

impl SlideCompositor {
    pub fn new(config: &StyleConfig) -> Result<Self> {
        let background = load_background(config)?;

        let title_font = resolve_face(config.fonts.title.as_deref(), config.fonts.title_size);
        let body_font = resolve_face(config.fonts.body.as_deref(), config.fonts.body_size);

        Ok(Self {
            config: config.clone(),
            background,
            title_font,
            body_font,
            title_color: color_or_default("colors.fg_title", &config.colors.fg_title),
            body_color: color_or_default("colors.fg_body", &config.colors.fg_body),
        })
    }

    /// Wrap and position the title and bullet text without drawing anything
    pub fn plan(&self, title: &str, bullet: &str) -> Vec<PlacedLine> {
        let layout = &self.config.layout;
        let padding = layout.safe_padding_px as i32;
        let title_advance = (self.title_font.size() * layout.line_spacing) as i32;
        let body_advance = (self.body_font.size() * layout.line_spacing) as i32;

        let mut placed = Vec::new();
        let mut y = padding;

        for text in wrap(title, layout.max_chars_per_line, DEFAULT_MAX_LINES) {
            placed.push(PlacedLine { role: LineRole::Title, text, x: padding, y });
            y += title_advance;
        }

        y += (self.title_font.size() * TITLE_BODY_GAP) as i32;

        for text in wrap(bullet, layout.max_chars_per_line, DEFAULT_MAX_LINES) {
            placed.push(PlacedLine { role: LineRole::Body, text, x: padding, y });
            y += body_advance;
        }

        placed
    }

    /// Render the slide for one bullet
    pub fn compose(&self, title: &str, bullet: &str) -> Slide {
        let mut canvas = self.background.clone();

        for line in self.plan(title, bullet) {
            let (face, color) = match line.role {
                LineRole::Title => (&self.title_font, self.title_color),
                LineRole::Body => (&self.body_font, self.body_color),
            };
            if !face.covers(&line.text) {
                warn!("Font has no glyphs for some of {:?}; set fonts.title/fonts.body", line.text);
            }
            face.draw_text(&mut canvas, line.x, line.y, &line.text, color);
        }

        Slide::new(canvas)
    }

    /// True when the title face fell back to the built-in bitmap font
    pub fn title_uses_builtin_font(&self) -> bool {
        self.title_font.is_builtin()
    }

    /// True when the body face fell back to the built-in bitmap font
    pub fn body_uses_builtin_font(&self) -> bool {
        self.body_font.is_builtin()
    }
}

/// Render a single slide with a one-off compositor
pub fn compose(title: &str, bullet: &str, config: &StyleConfig) -> Result<Slide> {
    Ok(SlideCompositor::new(config)?.compose(title, bullet))
}

fn load_background(config: &StyleConfig) -> Result<RgbImage> {
    let (width, height) = (config.size.width, config.size.height);
    let white = || RgbImage::from_pixel(width, height, WHITE);

    let Some(path) = config.background.image.as_deref() else {
        return Ok(white());
    };

    if !path.exists() {
        debug!("Background image {:?} not found, using a white canvas", path);
        return Ok(white());
    }

    let image = image::open(path).map_err(|e| RenderError::Background {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    debug!("Background {:?} resized from {}x{} to {}x{}", path, image.width(), image.height(), width, height);
    Ok(image::imageops::resize(&image.to_rgb8(), width, height, FilterType::Lanczos3))
}

/// Configured font, then an installed system font, then the built-in face
fn resolve_face(path: Option<&Path>, size: f32) -> FontFace {
    match load_font(path, size) {
        Ok(face) => face,
        Err(e) => {
            debug!("Configured font unavailable at {}px: {}", size, e);
            load_system_font(size).unwrap_or_else(|_| {
                debug!("No system font found, using built-in font at {}px", size);
                FontFace::builtin(size)
            })
        }
    }
}

fn color_or_default(key: &str, value: &str) -> Rgb<u8> {
    parse_color(value).unwrap_or_else(|| {
        warn!("Invalid color for {}: {:?}, using #111111", key, value);
        DEFAULT_INK
    })
}
