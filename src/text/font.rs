use std::path::Path;

use image::{Rgb, RgbImage};
use rusttype::{point, Font, Scale};

use crate::{error::FontLoadError, text::builtin_font};

/// A font face at a fixed pixel size, ready to draw onto a slide
pub struct FontFace {
    size: f32,
    kind: FaceKind,
}

enum FaceKind {
    TrueType(Font<'static>),
    Builtin,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            FaceKind::TrueType(_) => "truetype",
            FaceKind::Builtin => "builtin",
        };
        f.debug_struct("FontFace")
            .field("size", &self.size)
            .field("kind", &kind)
            .finish()
    }
}

/// Load a TrueType/OpenType face from `path` at `size` pixels.
///
/// The caller decides what to do on failure; see [`FontFace::builtin`].
pub fn load_font(path: Option<&Path>, size: f32) -> Result<FontFace, FontLoadError> {
    let path = path.ok_or(FontLoadError::NotConfigured)?;

    let data = std::fs::read(path).map_err(|source| FontLoadError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let font = Font::try_from_vec(data).ok_or_else(|| FontLoadError::InvalidFont {
        path: path.display().to_string(),
    })?;

    Ok(FontFace {
        size,
        kind: FaceKind::TrueType(font),
    })
}

/// Fonts commonly installed with Japanese coverage, tried in order when no
/// usable font is configured
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/noto/NotoSansJP-Regular.ttf",
    "/usr/share/fonts/truetype/fonts-japanese-gothic.ttf",
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "C:\\Windows\\Fonts\\meiryo.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
];

/// Load the first readable face from [`SYSTEM_FONT_CANDIDATES`]
pub fn load_system_font(size: f32) -> Result<FontFace, FontLoadError> {
    SYSTEM_FONT_CANDIDATES
        .iter()
        .map(Path::new)
        .filter(|path| path.is_file())
        .find_map(|path| load_font(Some(path), size).ok())
        .ok_or(FontLoadError::NotConfigured)
}

impl FontFace {
    /// The always-available bitmap face
    pub fn builtin(size: f32) -> Self {
        Self {
            size,
            kind: FaceKind::Builtin,
        }
    }

    /// Nominal size in pixels; line advances are derived from it
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.kind, FaceKind::Builtin)
    }

    /// Whether every non-space character of `text` has a glyph in this face
    pub fn covers(&self, text: &str) -> bool {
        match &self.kind {
            FaceKind::TrueType(font) => text
                .chars()
                .all(|c| c.is_whitespace() || font.glyph(c).id().0 != 0),
            FaceKind::Builtin => builtin_font::covers(text),
        }
    }

    /// Draw a single line of text with its top edge at `y`
    pub fn draw_text(&self, canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>) {
        match &self.kind {
            FaceKind::TrueType(font) => draw_truetype(font, self.size, canvas, x, y, text, color),
            FaceKind::Builtin => builtin_font::draw(self.size, canvas, x, y, text, color),
        }
    }
}

fn draw_truetype(
    font: &Font<'static>,
    size: f32,
    canvas: &mut RgbImage,
    x: i32,
    y: i32,
    text: &str,
    color: Rgb<u8>,
) {
    let scale = Scale::uniform(size);
    let ascent = font.v_metrics(scale).ascent;
    let origin = point(x as f32, y as f32 + ascent);

    for glyph in font.layout(text, scale, origin) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, coverage| {
                blend_pixel(canvas, bb.min.x + gx as i32, bb.min.y + gy as i32, color, coverage);
            });
        }
    }
}

/// Alpha-blend `color` over the pixel at (x, y); out-of-canvas writes are dropped.
pub(crate) fn blend_pixel(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= canvas.width() || y as u32 >= canvas.height() {
        return;
    }

    let alpha = coverage.clamp(0.0, 1.0);
    let dst = canvas.get_pixel_mut(x as u32, y as u32);
    for c in 0..3 {
        let blended = dst.0[c] as f32 * (1.0 - alpha) + color.0[c] as f32 * alpha;
        dst.0[c] = blended.round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const INK: Rgb<u8> = Rgb([17, 17, 17]);

    fn inked_pixels(canvas: &RgbImage) -> usize {
        canvas.pixels().filter(|p| **p != WHITE).count()
    }

    #[test]
    fn test_unconfigured_font() {
        let result = load_font(None, 56.0);
        assert!(matches!(result, Err(FontLoadError::NotConfigured)));
    }

    #[test]
    fn test_missing_font_file() {
        let result = load_font(Some(Path::new("/no/such/font.ttf")), 56.0);
        assert!(matches!(result, Err(FontLoadError::Read { .. })));
    }

    #[test]
    fn test_garbage_font_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"definitely not a font").unwrap();

        let result = load_font(Some(&path), 56.0);
        assert!(matches!(result, Err(FontLoadError::InvalidFont { .. })));
    }

    #[test]
    fn test_builtin_face_draws() {
        let face = FontFace::builtin(40.0);
        assert!(face.is_builtin());
        assert_eq!(face.size(), 40.0);

        let mut canvas = RgbImage::from_pixel(200, 60, WHITE);
        face.draw_text(&mut canvas, 4, 4, "Hi 水", INK);
        assert!(inked_pixels(&canvas) > 0);
    }

    #[test]
    fn test_drawing_off_canvas_is_clipped() {
        let face = FontFace::builtin(40.0);
        let mut canvas = RgbImage::from_pixel(20, 20, WHITE);
        face.draw_text(&mut canvas, -500, -500, "clipped", INK);
        face.draw_text(&mut canvas, 500, 500, "clipped", INK);
        assert_eq!(inked_pixels(&canvas), 0);
    }

    #[test]
    fn test_system_truetype_font_when_present() {
        let candidates = [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/Library/Fonts/Arial.ttf",
        ];
        let Some(path) = candidates.iter().map(Path::new).find(|p| p.exists()) else {
            return;
        };

        let face = load_font(Some(path), 32.0).unwrap();
        assert!(!face.is_builtin());

        let mut canvas = RgbImage::from_pixel(200, 60, WHITE);
        face.draw_text(&mut canvas, 4, 4, "Drink Water", INK);
        assert!(inked_pixels(&canvas) > 0);
        assert!(face.covers("Drink Water"));
    }

    #[test]
    fn test_system_font_is_a_truetype_face_when_found() {
        match load_system_font(40.0) {
            Ok(face) => {
                assert!(!face.is_builtin());
                assert_eq!(face.size(), 40.0);
            }
            Err(e) => assert!(matches!(e, FontLoadError::NotConfigured)),
        }
    }

    #[test]
    fn test_builtin_face_coverage() {
        let face = FontFace::builtin(56.0);
        assert!(face.covers("Stay hydrated…"));
        assert!(!face.covers("こまめな水分補給"));
    }

    #[test]
    fn test_blend_pixel() {
        let mut canvas = RgbImage::from_pixel(1, 1, WHITE);
        blend_pixel(&mut canvas, 0, 0, Rgb([0, 0, 0]), 1.0);
        assert_eq!(*canvas.get_pixel(0, 0), Rgb([0, 0, 0]));

        let mut canvas = RgbImage::from_pixel(1, 1, WHITE);
        blend_pixel(&mut canvas, 0, 0, Rgb([0, 0, 0]), 0.5);
        assert_eq!(*canvas.get_pixel(0, 0), Rgb([128, 128, 128]));
    }
}
