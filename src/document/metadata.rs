use std::path::PathBuf;

use serde_yaml::{Mapping, Value};

use crate::error::DocumentError;

/// Key/value settings from a document's metadata block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    entries: Mapping,
}

impl Metadata {
    /// Parse the raw text between the two `---` markers
    pub fn from_yaml(raw: &str) -> Result<Self, DocumentError> {
        let value: Value = serde_yaml::from_str(raw).map_err(|e| DocumentError::InvalidMetadata {
            reason: e.to_string(),
        })?;

        match value {
            Value::Null => Ok(Self::default()),
            Value::Mapping(entries) => Ok(Self { entries }),
            other => Err(DocumentError::InvalidMetadata {
                reason: format!("expected a mapping, found {}", value_kind(&other)),
            }),
        }
    }

    /// Look up an arbitrary key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Look up a key holding a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Background music path, if one is named
    ///
    /// The value is taken literally: `bgm: none` names a file called `none`,
    /// which simply won't exist. `null` and empty strings mean no music.
    pub fn bgm(&self) -> Option<PathBuf> {
        self.get_str("bgm")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
    }

    /// Hashtags listed for the upload, in document order
    pub fn hashtags(&self) -> Vec<String> {
        match self.get("hashtags") {
            Some(Value::Sequence(items)) => items
                .iter()
                .filter_map(scalar_to_string)
                .filter(|s| !s.is_empty())
                .collect(),
            Some(Value::String(s)) => s.split_whitespace().map(str::to_string).collect(),
            _ => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bgm_values() {
        let meta = Metadata::from_yaml("bgm: none\n").unwrap();
        assert_eq!(meta.bgm(), Some(PathBuf::from("none")));

        let meta = Metadata::from_yaml("bgm: assets/calm.mp3\n").unwrap();
        assert_eq!(meta.bgm(), Some(PathBuf::from("assets/calm.mp3")));

        let meta = Metadata::from_yaml("bgm:\n").unwrap();
        assert_eq!(meta.bgm(), None);

        let meta = Metadata::from_yaml("bgm: ''\n").unwrap();
        assert_eq!(meta.bgm(), None);
    }

    #[test]
    fn test_hashtags_sequence_and_string() {
        let meta = Metadata::from_yaml("hashtags: ['#health', '#water']\n").unwrap();
        assert_eq!(meta.hashtags(), vec!["#health", "#water"]);

        let meta = Metadata::from_yaml("hashtags: \"#a #b\"\n").unwrap();
        assert_eq!(meta.hashtags(), vec!["#a", "#b"]);

        let meta = Metadata::from_yaml("title: x\n").unwrap();
        assert!(meta.hashtags().is_empty());
    }

    #[test]
    fn test_empty_block_is_empty_mapping() {
        let meta = Metadata::from_yaml("\n").unwrap();
        assert!(meta.is_empty());
    }

    #[test]
    fn test_opaque_keys_pass_through() {
        let meta = Metadata::from_yaml("lang: ja\nvoice: 3\n").unwrap();
        assert_eq!(meta.len(), 2);
        assert_eq!(meta.get_str("lang"), Some("ja"));
        assert_eq!(meta.get("voice").and_then(Value::as_u64), Some(3));
    }

    #[test]
    fn test_non_mapping_is_rejected() {
        let result = Metadata::from_yaml("- just\n- a list\n");
        assert!(matches!(result, Err(DocumentError::InvalidMetadata { .. })));

        let result = Metadata::from_yaml("key: [broken\n");
        assert!(matches!(result, Err(DocumentError::InvalidMetadata { .. })));
    }
}
