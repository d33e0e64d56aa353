use thiserror::Error;

/// Main error type for slidereel
#[derive(Error, Debug)]
pub enum SlideError {
    #[error("Input file not found: {path}")]
    MissingInputFile { path: String },

    #[error("Settings file not found: {path}")]
    MissingSettingsFile { path: String },

    #[error("Malformed document: {0}")]
    Document(#[from] DocumentError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Slide rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Video processing error: {0}")]
    Video(#[from] VideoError),

    #[error("Audio processing error: {0}")]
    Audio(#[from] AudioError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source document errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DocumentError {
    #[error("metadata block delimiter '---' must appear at least twice")]
    MissingMetadataDelimiter,

    #[error("metadata block is not a valid key/value mapping: {reason}")]
    InvalidMetadata { reason: String },

    #[error("no '# ' heading line found in body")]
    MissingTitle,

    #[error("no '- ' bullet lines found in body")]
    MissingBullets,
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path} ({reason})")]
    ParseFailed { path: String, reason: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },
}

/// Slide compositing errors
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to load background image {path}: {reason}")]
    Background { path: String, reason: String },

    #[error("Failed to save slide {path}: {reason}")]
    SaveFailed { path: String, reason: String },
}

/// Font loading errors
///
/// Never escapes the slide compositor, which falls back to the built-in face.
#[derive(Error, Debug)]
pub enum FontLoadError {
    #[error("no font file configured")]
    NotConfigured,

    #[error("failed to read font file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("not a usable TrueType/OpenType font: {path}")]
    InvalidFont { path: String },
}

/// Video-specific errors
#[derive(Error, Debug)]
pub enum VideoError {
    #[error("Video encoder not available: {reason}")]
    EncoderUnavailable { reason: String },

    #[error("Video encoding failed: {reason}")]
    EncodingFailed { reason: String },

    #[error("Invalid video parameters: {details}")]
    InvalidParameters { details: String },
}

/// Audio-specific errors
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to load audio file: {path}")]
    LoadFailed { path: String },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Invalid audio parameters: {details}")]
    InvalidParameters { details: String },

    #[error("Failed to write audio track {path}: {reason}")]
    WriteFailed { path: String, reason: String },
}

/// Convenience type alias for Results using SlideError
pub type Result<T> = std::result::Result<T, SlideError>;

/// Exit status for a successful run
pub const EXIT_OK: u8 = 0;
/// Exit status for a wrong argument count or other usage error
pub const EXIT_USAGE: u8 = 1;
/// Exit status when the input document does not exist
pub const EXIT_MISSING_INPUT: u8 = 2;
/// Exit status when the settings file does not exist
pub const EXIT_MISSING_SETTINGS: u8 = 3;
/// Exit status for a malformed source document
pub const EXIT_MALFORMED_DOCUMENT: u8 = 4;
/// Exit status for every other failure
pub const EXIT_UNEXPECTED: u8 = 5;

impl SlideError {
    /// Process exit status reported by the CLI for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::MissingInputFile { .. } => EXIT_MISSING_INPUT,
            Self::MissingSettingsFile { .. } => EXIT_MISSING_SETTINGS,
            Self::Document(_) => EXIT_MALFORMED_DOCUMENT,
            _ => EXIT_UNEXPECTED,
        }
    }

    /// Get a localized, user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingInputFile { path } => {
                format!("入力ファイルが見つかりません: {}", path)
            }
            Self::MissingSettingsFile { path } => {
                format!("設定ファイルが見つかりません: {}", path)
            }
            Self::Document(DocumentError::MissingMetadataDelimiter) => {
                "Markdownにフロントマター(---で囲まれたブロック)がありません".to_string()
            }
            Self::Document(DocumentError::InvalidMetadata { reason }) => {
                format!("フロントマターを読み取れません: {}", reason)
            }
            Self::Document(DocumentError::MissingTitle) => {
                "本文にタイトル(# 見出し)がありません".to_string()
            }
            Self::Document(DocumentError::MissingBullets) => {
                "本文に箇条書き(- 項目)がありません".to_string()
            }
            Self::Video(VideoError::EncoderUnavailable { reason }) => {
                format!("動画エンコーダを利用できません (ffmpegをインストールしてください): {}", reason)
            }
            _ => format!("予期しないエラーが発生しました: {}", self),
        }
    }
}
