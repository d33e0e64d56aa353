//! # SlideReel
//!
//! Turn a short markdown note into a vertical slideshow video.
//!
//! A note has a YAML front matter block, one `# title` line and a list of
//! `- bullet` lines. Every bullet becomes one slide showing the title and that
//! bullet, each slide is held for a fixed time, and the slides are encoded into
//! an mp4 with optional background music.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use slidereel::{composition::render_file, config::DEFAULT_SETTINGS_PATH};
//!
//! # fn main() -> slidereel::Result<()> {
//! let summary = render_file(Path::new("notes/drink_water.md"), Path::new(DEFAULT_SETTINGS_PATH))?;
//! println!("{} slides -> {:?}", summary.slide_count, summary.output_path);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`document`] - Front matter, title and bullet extraction
//! - [`text`] - Line wrapping and font faces
//! - [`slides`] - Slide compositing
//! - [`audio`] - Background music decoding and fitting
//! - [`video`] - ffmpeg-driven video assembly
//! - [`preflight`] - Encoder availability check
//! - [`composition`] - The render pipeline
//! - [`config`] - Style settings

pub mod audio;
pub mod composition;
pub mod config;
pub mod document;
pub mod error;
pub mod preflight;
pub mod slides;
pub mod text;
pub mod video;

// Re-export commonly used types for convenience
pub use crate::{
    composition::{render_file, RenderEngine, RenderSummary},
    config::StyleConfig,
    document::Document,
    error::{Result, SlideError},
};
