use std::path::{Path, PathBuf};

use tracing::debug;

use crate::audio::{loader::AudioLoader, types::AudioData};
use crate::error::{AudioError, Result};

/// Gain applied to background music under the slides
pub const BACKGROUND_VOLUME: f32 = 0.25;

/// Background music fitted to a video's length
#[derive(Debug, Clone)]
pub struct BackgroundTrack {
    /// Interleaved samples
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl BackgroundTrack {
    pub fn duration(&self) -> f64 {
        AudioData::duration_from_samples(self.samples.len(), self.sample_rate, self.channels)
    }
}

/// Scale `audio` by `volume` and loop or trim it to exactly `duration` seconds.
pub fn fit_to_duration(audio: &AudioData, duration: f64, volume: f32) -> Result<BackgroundTrack> {
    if audio.sample_rate == 0 || audio.channels == 0 {
        return Err(AudioError::InvalidParameters {
            details: format!("{} Hz, {} channels", audio.sample_rate, audio.channels),
        }
        .into());
    }

    if !duration.is_finite() || duration <= 0.0 {
        return Err(AudioError::InvalidParameters {
            details: format!("target duration {}", duration),
        }
        .into());
    }

    let channels = audio.channels as usize;
    let source_len = audio.frame_count() * channels;
    if source_len == 0 {
        return Err(AudioError::InvalidParameters {
            details: "audio contains no samples".to_string(),
        }
        .into());
    }

    let target_frames = (duration * audio.sample_rate as f64).round() as usize;
    let samples = (0..target_frames * channels)
        .map(|i| (audio.samples[i % source_len] * volume).clamp(-1.0, 1.0))
        .collect();

    Ok(BackgroundTrack {
        samples,
        sample_rate: audio.sample_rate,
        channels: audio.channels,
    })
}

/// Write a track as a 32-bit float WAV file
pub fn write_wav(track: &BackgroundTrack, path: &Path) -> Result<()> {
    let write_failed = |reason: String| AudioError::WriteFailed {
        path: path.display().to_string(),
        reason,
    };

    let spec = hound::WavSpec {
        channels: track.channels,
        sample_rate: track.sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = hound::WavWriter::create(path, spec).map_err(|e| write_failed(e.to_string()))?;
    for &sample in &track.samples {
        writer
            .write_sample(sample)
            .map_err(|e| write_failed(e.to_string()))?;
    }
    writer.finalize().map_err(|e| write_failed(e.to_string()))?;
    Ok(())
}

/// Decode `source`, fit it to `duration` at [`BACKGROUND_VOLUME`] and write it to `out_path`.
pub fn prepare_background_audio(source: &Path, duration: f64, out_path: &Path) -> Result<PathBuf> {
    let audio = AudioLoader::load(source)?;
    let track = fit_to_duration(&audio, duration, BACKGROUND_VOLUME)?;

    debug!(
        "Background track: {:?} ({:.1}s) fitted to {:.1}s at volume {}",
        audio.file_path,
        audio.duration,
        track.duration(),
        BACKGROUND_VOLUME
    );

    write_wav(&track, out_path)?;
    Ok(out_path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn audio(samples: Vec<f32>, sample_rate: u32, channels: u16) -> AudioData {
        let duration = AudioData::duration_from_samples(samples.len(), sample_rate, channels);
        AudioData {
            samples,
            sample_rate,
            channels,
            duration,
            file_path: PathBuf::from("bgm.wav"),
        }
    }

    #[test]
    fn test_short_source_is_looped_and_scaled() {
        // 2 stereo frames at 4 Hz, stretched to 1 second
        let source = audio(vec![1.0, -1.0, 0.5, -0.5], 4, 2);
        let track = fit_to_duration(&source, 1.0, BACKGROUND_VOLUME).unwrap();

        assert_eq!(track.samples.len(), 8);
        assert_eq!(
            track.samples,
            vec![0.25, -0.25, 0.125, -0.125, 0.25, -0.25, 0.125, -0.125]
        );
        assert_eq!(track.duration(), 1.0);
    }

    #[test]
    fn test_long_source_is_trimmed() {
        let source = audio(vec![0.4; 100], 10, 1);
        let track = fit_to_duration(&source, 2.5, 0.5).unwrap();
        assert_eq!(track.samples.len(), 25);
        assert!(track.samples.iter().all(|s| (*s - 0.2).abs() < 1e-6));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(fit_to_duration(&audio(vec![], 10, 1), 1.0, 0.25).is_err());
        assert!(fit_to_duration(&audio(vec![0.1], 0, 1), 1.0, 0.25).is_err());
        assert!(fit_to_duration(&audio(vec![0.1], 10, 1), 0.0, 0.25).is_err());
        assert!(fit_to_duration(&audio(vec![0.1], 10, 1), f64::NAN, 0.25).is_err());
    }

    #[test]
    fn test_prepare_background_audio_writes_wav() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("bgm.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&source, spec).unwrap();
        for _ in 0..8000 {
            writer.write_sample(16384i16).unwrap();
        }
        writer.finalize().unwrap();

        let out = dir.path().join("bgm_fitted.wav");
        prepare_background_audio(&source, 3.0, &out).unwrap();

        let fitted = AudioLoader::load(&out).unwrap();
        assert_eq!(fitted.sample_rate, 8000);
        assert_eq!(fitted.channels, 1);
        assert_eq!(fitted.frame_count(), 24000);
        assert!((fitted.samples[0] - 0.125).abs() < 1e-6);
    }

    #[test]
    fn test_prepare_missing_source_fails() {
        let dir = tempdir().unwrap();
        let result = prepare_background_audio(
            &dir.path().join("missing.wav"),
            3.0,
            &dir.path().join("out.wav"),
        );
        assert!(result.is_err());
    }
}
