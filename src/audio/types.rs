use std::path::PathBuf;

/// Decoded audio with metadata
#[derive(Debug, Clone)]
pub struct AudioData {
    /// Audio samples (interleaved for stereo, mono for single channel)
    pub samples: Vec<f32>,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Number of channels (1 = mono, 2 = stereo)
    pub channels: u16,

    /// Duration in seconds
    pub duration: f64,

    /// Original file path
    pub file_path: PathBuf,
}

impl AudioData {
    /// Number of sample frames (one sample per channel)
    pub fn frame_count(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    /// Duration implied by the sample count
    pub fn duration_from_samples(sample_count: usize, sample_rate: u32, channels: u16) -> f64 {
        let per_second = sample_rate as u64 * channels as u64;
        if per_second == 0 {
            return 0.0;
        }
        sample_count as f64 / per_second as f64
    }
}
