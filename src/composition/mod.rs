//! # Render Engine
//!
//! Wires the document parser, slide compositor and video assembler together
//! and reports what was produced.

pub mod engine;

pub use engine::{output_path_for, render_file, RenderEngine, RenderSummary};
