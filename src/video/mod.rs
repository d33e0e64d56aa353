//! # Video Assembly
//!
//! Turns rendered slides into an mp4 using the external `ffmpeg` binary.
//! Slides are written as PNG files to a private temp directory, timed through a
//! concat list and encoded at a fixed 30 fps. Optional background music is muxed
//! in as the only audio track.

pub mod assembler;
pub mod types;

pub use assembler::{concat_list, write_concat_list, VideoAssembler};
pub use types::{EncodedVideo, VideoParams, OUTPUT_FPS};
