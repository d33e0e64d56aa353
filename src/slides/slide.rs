use std::path::Path;

use image::RgbImage;

use crate::error::{RenderError, Result};

/// One rendered slide canvas
///
/// A thin wrapper around an RGB image buffer; one slide is produced per
/// bullet and handed to the video assembler.
#[derive(Clone, Debug)]
pub struct Slide {
    buffer: RgbImage,
}

impl Slide {
    /// Create a slide from an RGB image buffer
    pub fn new(buffer: RgbImage) -> Self {
        Self { buffer }
    }

    /// Create a slide with the given dimensions filled with the specified color
    #[cfg(test)]
    pub fn new_filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        let buffer = RgbImage::from_pixel(width, height, image::Rgb(color));
        Self { buffer }
    }

    /// Get the width of the slide
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Get the height of the slide
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Get a pixel at the given coordinates (returns RGB array)
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.buffer.get_pixel(x, y).0
    }

    /// Get the underlying image buffer
    pub fn as_image(&self) -> &RgbImage {
        &self.buffer
    }

    /// Save the slide as a PNG file
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.buffer.save(path).map_err(|e| {
            RenderError::SaveFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}
