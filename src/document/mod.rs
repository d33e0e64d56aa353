//! # Source Document
//!
//! Parses the markdown note a video is rendered from: a `---` delimited YAML
//! metadata block followed by a body with one `# ` heading and `- ` bullets.
//!
//! ```rust
//! use slidereel::document::parse;
//!
//! let doc = parse("---\nbgm: none\n---\n# Drink Water\n- Stay hydrated\n").unwrap();
//! assert_eq!(doc.title, "Drink Water");
//! assert_eq!(doc.bullets, vec!["Stay hydrated".to_string()]);
//! ```

pub mod metadata;
pub mod parser;

pub use metadata::Metadata;
pub use parser::{parse, Document};
