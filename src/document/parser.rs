use std::path::Path;

use tracing::debug;

use crate::{
    document::metadata::Metadata,
    error::{DocumentError, Result, SlideError},
};

/// Marker that opens and closes the metadata block
pub const METADATA_MARKER: &str = "---";
/// Prefix of the title line
pub const HEADING_MARKER: &str = "# ";
/// Prefix of each bullet line
pub const BULLET_MARKER: &str = "- ";

/// A parsed source document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub metadata: Metadata,

    /// Text of the first heading line; never empty
    pub title: String,

    /// Bullet texts in document order; never empty
    pub bullets: Vec<String>,
}

impl Document {
    /// Read and parse a document from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SlideError::MissingInputFile {
                path: path.display().to_string(),
            });
        }

        let raw = std::fs::read_to_string(path)?;
        let document = parse(&raw)?;
        debug!(
            "Parsed {:?}: title {:?}, {} bullets, {} metadata keys",
            path,
            document.title,
            document.bullets.len(),
            document.metadata.len()
        );
        Ok(document)
    }

    /// Number of slides the document renders to
    pub fn slide_count(&self) -> usize {
        self.bullets.len()
    }
}

/// Parse raw document text
pub fn parse(raw: &str) -> std::result::Result<Document, DocumentError> {
    let mut parts = raw.splitn(3, METADATA_MARKER);
    let _preamble = parts.next();
    let (front, body) = match (parts.next(), parts.next()) {
        (Some(front), Some(body)) => (front, body),
        _ => return Err(DocumentError::MissingMetadataDelimiter),
    };

    let metadata = Metadata::from_yaml(front)?;

    let mut title: Option<String> = None;
    let mut bullets = Vec::new();

    for line in body.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }

        if let Some(heading) = line.strip_prefix(HEADING_MARKER) {
            if title.is_none() {
                title = Some(heading.trim().to_string());
            }
        } else if let Some(bullet) = line.strip_prefix(BULLET_MARKER) {
            bullets.push(bullet.trim().to_string());
        }
    }

    let title = title.ok_or(DocumentError::MissingTitle)?;
    if bullets.is_empty() {
        return Err(DocumentError::MissingBullets);
    }

    Ok(Document {
        metadata,
        title,
        bullets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATER: &str = "---\nbgm: none\nhashtags: ['#health']\n---\n\n# Drink Water\n\n- Stay hydrated\n- Improves focus\n";

    #[test]
    fn test_parse_full_document() {
        let doc = parse(WATER).unwrap();
        assert_eq!(doc.title, "Drink Water");
        assert_eq!(doc.bullets, vec!["Stay hydrated", "Improves focus"]);
        assert_eq!(doc.metadata.get_str("bgm"), Some("none"));
        assert_eq!(doc.metadata.hashtags(), vec!["#health"]);
        assert_eq!(doc.slide_count(), 2);
    }

    #[test]
    fn test_missing_second_delimiter() {
        let result = parse("---\nbgm: none\n# Title\n- bullet\n");
        assert_eq!(result, Err(DocumentError::MissingMetadataDelimiter));

        let result = parse("# Title\n- bullet\n");
        assert_eq!(result, Err(DocumentError::MissingMetadataDelimiter));
    }

    #[test]
    fn test_missing_title() {
        let result = parse("---\nbgm: none\n---\n## Not a title\n- bullet\n");
        assert_eq!(result, Err(DocumentError::MissingTitle));
    }

    #[test]
    fn test_missing_bullets() {
        let result = parse("---\n---\n# Title\nJust prose, no list.\n");
        assert_eq!(result, Err(DocumentError::MissingBullets));
    }

    #[test]
    fn test_only_first_heading_counts() {
        let doc = parse("---\n---\n# First\n- a\n# Second\n- b\n").unwrap();
        assert_eq!(doc.title, "First");
        assert_eq!(doc.bullets, vec!["a", "b"]);
    }

    #[test]
    fn test_lines_are_trimmed_before_matching() {
        let doc = parse("---\n---\n   #   Spaced title  \n\t-  indented bullet \n* star bullet\n").unwrap();
        assert_eq!(doc.title, "Spaced title");
        assert_eq!(doc.bullets, vec!["indented bullet"]);
    }

    #[test]
    fn test_later_markers_stay_in_body() {
        let doc = parse("---\n---\n# Title\n- before\n---\n- after\n").unwrap();
        assert_eq!(doc.bullets, vec!["before", "after"]);
    }

    #[test]
    fn test_japanese_document() {
        let doc = parse("---\nhashtags: [\"#習慣\"]\n---\n# 水を飲もう\n- こまめな水分補給\n").unwrap();
        assert_eq!(doc.title, "水を飲もう");
        assert_eq!(doc.bullets, vec!["こまめな水分補給"]);
    }

    #[test]
    fn test_from_file_missing() {
        let result = Document::from_file("/definitely/not/here.md");
        assert!(matches!(result, Err(SlideError::MissingInputFile { .. })));
    }
}
