use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, info, warn};

use crate::audio::prepare_background_audio;
use crate::error::{Result, VideoError};
use crate::slides::Slide;
use crate::video::types::{EncodedVideo, VideoParams};

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Encodes slides into an mp4 by driving the external `ffmpeg` binary
pub struct VideoAssembler {
    params: VideoParams,
    temp_dir: Option<PathBuf>,
}

impl VideoAssembler {
    pub fn new(params: VideoParams) -> Self {
        Self {
            params,
            temp_dir: None,
        }
    }

    fn ensure_temp_dir(&mut self) -> Result<PathBuf> {
        if let Some(ref temp_dir) = self.temp_dir {
            return Ok(temp_dir.clone());
        }

        let temp_dir = std::env::temp_dir().join(format!(
            "slidereel_{}_{}",
            std::process::id(),
            TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        fs::create_dir_all(&temp_dir)?;
        self.temp_dir = Some(temp_dir.clone());
        Ok(temp_dir)
    }

    /// Encode `slides`, each shown for `duration_per_slide` seconds, into `output_path`.
    ///
    /// Background music at `audio_path` is optional. Any failure while preparing or
    /// muxing it is logged and the silent video is written instead.
    pub fn assemble(
        &mut self,
        slides: &[Slide],
        duration_per_slide: f64,
        audio_path: Option<&Path>,
        output_path: &Path,
    ) -> Result<EncodedVideo> {
        validate_inputs(slides, duration_per_slide)?;
        let total_duration = slides.len() as f64 * duration_per_slide;

        info!(
            "Assembling {} slides x {:.1}s = {:.1}s",
            slides.len(),
            duration_per_slide,
            total_duration
        );

        let temp_dir = self.ensure_temp_dir()?;

        let slide_paths = save_slides(slides, &temp_dir)?;
        let list_path = temp_dir.join("slides.txt");
        fs::write(&list_path, concat_list(&slide_paths, duration_per_slide))?;

        let video_only_path = temp_dir.join("video_only.mp4");
        self.encode_slides(&list_path, total_duration, &video_only_path)?;

        let has_audio = match audio_path {
            Some(audio) => match self.add_background_audio(
                &video_only_path,
                audio,
                total_duration,
                &temp_dir,
                output_path,
            ) {
                Ok(()) => true,
                Err(e) => {
                    warn!("Background music skipped: {}", e);
                    false
                }
            },
            None => false,
        };

        if !has_audio {
            fs::copy(&video_only_path, output_path)?;
        }

        let file_size = fs::metadata(output_path)?.len();
        info!("Video written: {:?} ({} KB)", output_path, file_size / 1024);

        Ok(EncodedVideo {
            path: output_path.to_path_buf(),
            duration: total_duration,
            slide_count: slides.len(),
            file_size,
            has_audio,
        })
    }

    fn encode_slides(&self, list_path: &Path, total_duration: f64, output_path: &Path) -> Result<()> {
        let mut cmd = Command::new("ffmpeg");
        cmd.args(["-hide_banner", "-loglevel", "error"])
            .args(["-f", "concat", "-safe", "0"])
            .arg("-i")
            .arg(list_path)
            .args(["-r", &self.params.fps.to_string()])
            .args(["-c:v", &self.params.codec])
            .args(["-pix_fmt", &self.params.pixel_format])
            .args(["-crf", &self.params.crf().to_string()])
            .args(["-t", &format!("{:.3}", total_duration)])
            .arg("-y")
            .arg(output_path);

        run_ffmpeg(cmd)
    }

    fn add_background_audio(
        &self,
        video_path: &Path,
        audio_path: &Path,
        total_duration: f64,
        temp_dir: &Path,
        output_path: &Path,
    ) -> Result<()> {
        if !audio_path.exists() {
            return Err(VideoError::InvalidParameters {
                details: format!("background music {:?} not found", audio_path),
            }
            .into());
        }

        let track_path = temp_dir.join("bgm.wav");
        prepare_background_audio(audio_path, total_duration, &track_path)?;
        debug!("Muxing {:?} under {:?}", track_path, video_path);

        let mut cmd = Command::new("ffmpeg");
        cmd.args(["-hide_banner", "-loglevel", "error"])
            .arg("-i")
            .arg(video_path)
            .arg("-i")
            .arg(&track_path)
            .args(["-map", "0:v:0", "-map", "1:a:0"])
            .args(["-c:v", "copy"])
            .args(["-c:a", &self.params.audio_codec])
            .args(["-t", &format!("{:.3}", total_duration)])
            .arg("-y")
            .arg(output_path);

        run_ffmpeg(cmd)
    }

    pub fn cleanup(&mut self) -> Result<()> {
        if let Some(temp_dir) = &self.temp_dir {
            if let Err(e) = fs::remove_dir_all(temp_dir) {
                warn!("Failed to remove temporary directory: {}", e);
            }
            self.temp_dir = None;
        }
        Ok(())
    }
}

impl Default for VideoAssembler {
    fn default() -> Self {
        Self::new(VideoParams::default())
    }
}

impl Drop for VideoAssembler {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

fn validate_inputs(slides: &[Slide], duration_per_slide: f64) -> Result<()> {
    if slides.is_empty() {
        return Err(VideoError::InvalidParameters {
            details: "no slides to encode".to_string(),
        }
        .into());
    }

    if !duration_per_slide.is_finite() || duration_per_slide <= 0.0 {
        return Err(VideoError::InvalidParameters {
            details: format!("slide duration must be positive, got {}", duration_per_slide),
        }
        .into());
    }

    Ok(())
}

fn save_slides(slides: &[Slide], temp_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(slides.len());

    for (index, slide) in slides.iter().enumerate() {
        let path = temp_dir.join(format!("slide_{:03}.png", index));
        slide.save_png(&path)?;
        paths.push(path);
    }

    debug!("Saved {} slides to {:?}", paths.len(), temp_dir);
    Ok(paths)
}

/// Contents of an ffmpeg concat list showing each image for `duration` seconds.
///
/// The last image is listed twice; the concat demuxer ignores the final `duration`
/// otherwise.
pub fn concat_list(paths: &[PathBuf], duration: f64) -> String {
    let mut list = String::new();

    for path in paths {
        list.push_str(&format!("file '{}'\n", escape_concat_path(path)));
        list.push_str(&format!("duration {:.6}\n", duration));
    }

    if let Some(last) = paths.last() {
        list.push_str(&format!("file '{}'\n", escape_concat_path(last)));
    }

    list
}

fn escape_concat_path(path: &Path) -> String {
    path.display().to_string().replace('\'', r"'\''")
}

fn run_ffmpeg(mut cmd: Command) -> Result<()> {
    let output = cmd.output().map_err(|e| VideoError::EncoderUnavailable {
        reason: e.to_string(),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(VideoError::EncodingFailed {
            reason: format!("FFmpeg failed: {}", stderr.trim()),
        }
        .into());
    }

    Ok(())
}

/// Write a concat list to `path`; used by the preview tool to hand slides to other encoders.
pub fn write_concat_list(paths: &[PathBuf], duration: f64, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(concat_list(paths, duration).as_bytes())?;
    Ok(())
}
