//! # Slide Rendering
//!
//! Composites the wrapped title and one bullet onto a canvas per slide.
//!
//! ```rust,no_run
//! use slidereel::{config::StyleConfig, slides::SlideCompositor};
//!
//! # fn main() -> slidereel::Result<()> {
//! let config = StyleConfig::from_file("config/style.yaml")?;
//! let compositor = SlideCompositor::new(&config)?;
//! let slide = compositor.compose("Drink Water", "Stay hydrated");
//! slide.save_png("slide_01.png")?;
//! # Ok(())
//! # }
//! ```

pub mod color;
pub mod compositor;
pub mod slide;

pub use compositor::{compose, LineRole, PlacedLine, SlideCompositor};
pub use slide::Slide;
