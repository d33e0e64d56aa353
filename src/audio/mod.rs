//! # Background Audio
//!
//! Decodes the optional background music and fits it to the video length.
//!
//! - **Decoding**: WAV through `hound`, MP3/FLAC/OGG/AAC through `symphonia`
//! - **Fitting**: fixed [`BACKGROUND_VOLUME`], looped or trimmed to the video
//! - **Output**: a float WAV track handed to the video assembler
//!
//! ```rust,no_run
//! use std::path::Path;
//! use slidereel::audio::prepare_background_audio;
//!
//! # fn main() -> slidereel::Result<()> {
//! let track = prepare_background_audio(Path::new("bgm.mp3"), 14.0, Path::new("bgm_fitted.wav"))?;
//! println!("Wrote {:?}", track);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod mix;
pub mod types;

pub use loader::AudioLoader;
pub use mix::{fit_to_duration, prepare_background_audio, write_wav, BackgroundTrack, BACKGROUND_VOLUME};
pub use types::AudioData;
