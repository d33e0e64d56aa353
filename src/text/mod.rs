//! # Text Layout
//!
//! Line wrapping for slide text and the font faces it is drawn with.

mod builtin_font;
pub mod font;
pub mod wrap;

pub use font::{load_font, load_system_font, FontFace, SYSTEM_FONT_CANDIDATES};
pub use wrap::{wrap, DEFAULT_MAX_LINES, ELLIPSIS};
