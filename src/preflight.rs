//! Startup checks for the external tools the renderer shells out to.

use std::process::Command;

use tracing::debug;

use crate::error::{Result, VideoError};

/// What was found on this machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    /// First line of `ffmpeg -version`
    pub ffmpeg_version: String,
}

/// Verify that `ffmpeg` can be executed.
pub fn check_capabilities() -> Result<Capabilities> {
    check_encoder("ffmpeg")
}

fn check_encoder(program: &str) -> Result<Capabilities> {
    let output = Command::new(program)
        .arg("-version")
        .output()
        .map_err(|e| VideoError::EncoderUnavailable {
            reason: format!("{}: {}", program, e),
        })?;

    if !output.status.success() {
        return Err(VideoError::EncoderUnavailable {
            reason: format!("{} -version exited with {}", program, output.status),
        }
        .into());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let ffmpeg_version = stdout.lines().next().unwrap_or_default().trim().to_string();
    debug!("Found encoder: {}", ffmpeg_version);

    Ok(Capabilities { ffmpeg_version })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SlideError;

    #[test]
    fn test_missing_encoder_is_reported() {
        let result = check_encoder("slidereel-no-such-encoder");
        assert!(matches!(
            result,
            Err(SlideError::Video(VideoError::EncoderUnavailable { .. }))
        ));
    }

    #[test]
    fn test_missing_encoder_exit_code() {
        let err = check_encoder("slidereel-no-such-encoder").unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_UNEXPECTED);
    }
}
