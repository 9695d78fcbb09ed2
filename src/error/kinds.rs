use std::{fmt, io};

/// Crate-wide `Result` type using [`MentionshError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, MentionshError>;

/// Top-level error type for mentionsh operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum MentionshError {
    /// Configuration errors.
    Config(ConfigError),

    /// Option collection errors.
    Options(OptionsError),

    /// I/O errors.
    Io(io::Error),

    /// Line editor errors.
    Editor(String),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },

    /// Any other configuration failure.
    Generic(String),
}

/// Errors loading an option collection.
#[derive(Debug)]
pub enum OptionsError {
    /// Options file not found.
    FileNotFound(String),

    /// File extension is neither `.json` nor `.toml`.
    UnsupportedFormat(String),

    /// File content is not a list of options.
    Parse { path: String, message: String },
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for MentionshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MentionshError::Config(e) => write!(f, "Configuration error: {e}"),
            MentionshError::Options(e) => write!(f, "Options error: {e}"),
            MentionshError::Io(e) => write!(f, "I/O error: {e}"),
            MentionshError::Editor(msg) => write!(f, "Editor error: {msg}"),
            MentionshError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
            ConfigError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsError::FileNotFound(path) => write!(f, "Options file not found: {path}"),
            OptionsError::UnsupportedFormat(path) => {
                write!(f, "Unsupported options file format: {path} (expected .json or .toml)")
            }
            OptionsError::Parse { path, message } => {
                write!(f, "Failed to parse options file {path}: {message}")
            }
        }
    }
}

impl std::error::Error for MentionshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MentionshError::Config(e) => Some(e),
            MentionshError::Options(e) => Some(e),
            MentionshError::Io(e) => Some(e),
            _ => None,
        }
    }
}
impl std::error::Error for ConfigError {}
impl std::error::Error for OptionsError {}

/* ========================= Conversions to MentionshError ========================= */

impl From<io::Error> for MentionshError {
    fn from(err: io::Error) -> Self {
        MentionshError::Io(err)
    }
}

impl From<ConfigError> for MentionshError {
    fn from(err: ConfigError) -> Self {
        MentionshError::Config(err)
    }
}

impl From<OptionsError> for MentionshError {
    fn from(err: OptionsError) -> Self {
        MentionshError::Options(err)
    }
}

impl From<serde_json::Error> for MentionshError {
    fn from(err: serde_json::Error) -> Self {
        MentionshError::Generic(format!("JSON error: {err}"))
    }
}

impl From<toml::de::Error> for MentionshError {
    fn from(err: toml::de::Error) -> Self {
        MentionshError::Config(ConfigError::InvalidFormat(err.to_string()))
    }
}

impl From<toml::ser::Error> for MentionshError {
    fn from(err: toml::ser::Error) -> Self {
        MentionshError::Config(ConfigError::Generic(format!(
            "Failed to serialize config: {err}"
        )))
    }
}

impl From<String> for MentionshError {
    fn from(msg: String) -> Self {
        MentionshError::Generic(msg)
    }
}

impl From<&str> for MentionshError {
    fn from(msg: &str) -> Self {
        MentionshError::Generic(msg.to_owned())
    }
}
