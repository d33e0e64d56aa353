use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Frame rate of every rendered video
pub const OUTPUT_FPS: f64 = 30.0;

/// Encoder parameters handed to ffmpeg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoParams {
    /// Output frame rate
    pub fps: f64,

    /// Video codec passed to `-c:v`
    pub codec: String,

    /// Audio codec passed to `-c:a` when music is muxed in
    pub audio_codec: String,

    /// Pixel format passed to `-pix_fmt`
    pub pixel_format: String,

    /// Quality setting (0-100, higher is better)
    pub quality: u8,
}

impl VideoParams {
    /// Map the 0-100 quality scale onto x264's CRF range (0 best, 51 worst)
    pub fn crf(&self) -> u8 {
        let quality = self.quality.min(100);
        51 - ((quality as f32 / 100.0) * 51.0) as u8
    }
}

impl Default for VideoParams {
    fn default() -> Self {
        Self {
            fps: OUTPUT_FPS,
            codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            pixel_format: "yuv420p".to_string(),
            quality: 65,
        }
    }
}

/// Represents an encoded video output
#[derive(Debug, Clone)]
pub struct EncodedVideo {
    pub path: PathBuf,
    /// Seconds
    pub duration: f64,
    pub slide_count: usize,
    /// Bytes
    pub file_size: u64,
    /// Whether background music made it into the file
    pub has_audio: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = VideoParams::default();
        assert_eq!(params.fps, 30.0);
        assert_eq!(params.codec, "libx264");
        assert_eq!(params.audio_codec, "aac");
        assert_eq!(params.pixel_format, "yuv420p");
        assert_eq!(params.crf(), 18);
    }

    #[test]
    fn test_crf_range() {
        let mut params = VideoParams::default();
        params.quality = 0;
        assert_eq!(params.crf(), 51);
        params.quality = 100;
        assert_eq!(params.crf(), 0);
        params.quality = 255;
        assert_eq!(params.crf(), 0);
    }
}
