use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    error::{ConfigError, Result, SlideError},
    slides::color::parse_color,
};

/// Settings path used when none is given on the command line
pub const DEFAULT_SETTINGS_PATH: &str = "config/style.yaml";

/// Style configuration for rendering slides and the output video
///
/// Every group and every key is optional; missing values take the documented
/// defaults. Loaded once per run and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Canvas dimensions
    #[serde(deserialize_with = "null_as_default")]
    pub size: SizeConfig,

    /// Text placement and timing
    #[serde(deserialize_with = "null_as_default")]
    pub layout: LayoutConfig,

    /// Slide background
    #[serde(deserialize_with = "null_as_default")]
    pub background: BackgroundConfig,

    /// Title and body font faces
    #[serde(deserialize_with = "null_as_default")]
    pub fonts: FontConfig,

    /// Text colors
    #[serde(deserialize_with = "null_as_default")]
    pub colors: ColorConfig,
}

/// Canvas size in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for SizeConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
        }
    }
}

/// Layout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Offset of the text block from the top-left corner
    pub safe_padding_px: u32,

    /// Maximum characters per wrapped line
    pub max_chars_per_line: usize,

    /// Line advance as a multiple of the font size
    pub line_spacing: f32,

    /// How long each slide stays on screen (seconds)
    pub slide_sec: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            safe_padding_px: 72,
            max_chars_per_line: 22,
            line_spacing: 1.15,
            slide_sec: 7.0,
        }
    }
}

/// Background configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Image stretched over the canvas; a plain white canvas when absent
    pub image: Option<PathBuf>,
}

/// Font configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// TrueType/OpenType file for the title
    pub title: Option<PathBuf>,

    /// TrueType/OpenType file for the bullet text
    pub body: Option<PathBuf>,

    /// Title font size in pixels
    pub title_size: f32,

    /// Body font size in pixels
    pub body_size: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            title: None,
            body: None,
            title_size: 72.0,
            body_size: 56.0,
        }
    }
}

/// Text color configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub fg_title: String,
    pub fg_body: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            fg_title: "#111111".to_string(),
            fg_body: "#111111".to_string(),
        }
    }
}

/// Settings file syntax, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsFormat {
    Yaml,
    Toml,
}

impl SettingsFormat {
    fn for_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }
}

impl StyleConfig {
    /// Load configuration from a YAML (default) or TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(SlideError::MissingSettingsFile {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let parse_failed = |reason: String| ConfigError::ParseFailed {
            path: path.display().to_string(),
            reason,
        };

        let config = match SettingsFormat::for_path(path) {
            SettingsFormat::Toml => {
                toml::from_str(&content).map_err(|e| parse_failed(e.to_string()))?
            }
            SettingsFormat::Yaml => {
                let value: serde_yaml::Value =
                    serde_yaml::from_str(&content).map_err(|e| parse_failed(e.to_string()))?;
                if value.is_null() {
                    StyleConfig::default()
                } else {
                    serde_yaml::from_value(value).map_err(|e| parse_failed(e.to_string()))?
                }
            }
        };

        Ok(config)
    }

    /// Save configuration to a YAML or TOML file, chosen by extension
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let invalid = |reason: String| ConfigError::InvalidValue {
            key: "config".to_string(),
            value: reason,
        };

        let content = match SettingsFormat::for_path(path) {
            SettingsFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| invalid(e.to_string()))?
            }
            SettingsFormat::Yaml => {
                serde_yaml::to_string(self).map_err(|e| invalid(e.to_string()))?
            }
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.size.validate()?;
        self.layout.validate()?;
        self.fonts.validate()?;
        self.colors.validate()?;
        Ok(())
    }

    /// Total video length for the given number of slides
    pub fn total_duration(&self, slide_count: usize) -> f64 {
        self.layout.slide_sec * slide_count as f64
    }
}

impl SizeConfig {
    fn validate(&self) -> Result<()> {
        // yuv420p output needs even dimensions
        for (key, value) in [("size.width", self.width), ("size.height", self.height)] {
            if value == 0 || value % 2 != 0 {
                return Err(invalid_value(key, value));
            }
        }
        Ok(())
    }
}

impl LayoutConfig {
    fn validate(&self) -> Result<()> {
        if !self.line_spacing.is_finite() || self.line_spacing <= 0.0 {
            return Err(invalid_value("layout.line_spacing", self.line_spacing));
        }

        if !self.slide_sec.is_finite() || self.slide_sec <= 0.0 {
            return Err(invalid_value("layout.slide_sec", self.slide_sec));
        }

        Ok(())
    }
}

impl FontConfig {
    fn validate(&self) -> Result<()> {
        for (key, size) in [
            ("fonts.title_size", self.title_size),
            ("fonts.body_size", self.body_size),
        ] {
            if !size.is_finite() || size <= 0.0 {
                return Err(invalid_value(key, size));
            }
        }
        Ok(())
    }
}

impl ColorConfig {
    fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("colors.fg_title", &self.fg_title),
            ("colors.fg_body", &self.fg_body),
        ] {
            if parse_color(value).is_none() {
                return Err(invalid_value(key, value));
            }
        }
        Ok(())
    }
}

fn invalid_value(key: &str, value: impl ToString) -> SlideError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
    .into()
}

/// A group written as `layout:` with nothing under it takes its defaults.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
