//! Configuration management for mentionsh
//!
//! This module handles loading, parsing, and managing configuration from various sources:
//! - Configuration files (TOML format)
//! - Option collection files (JSON or TOML)
//! - Command-line arguments
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, OptionsError, Result};
use crate::mention::{DEFAULT_SYMBOL, MentionOption, MentionSettings, is_separator};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mention configuration
    pub mention: MentionConfig,

    /// Display configuration
    pub display: DisplayConfig,

    /// History configuration
    pub history: HistoryConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Mention trigger and option collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentionConfig {
    /// Trigger symbol
    #[serde(default = "default_symbol")]
    pub symbol: char,

    /// Display the option list above the input
    #[serde(default)]
    pub reverse: bool,

    /// File with additional options, loaded after the inline ones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options_file: Option<PathBuf>,

    /// Inline options
    #[serde(default)]
    pub options: Vec<MentionOption>,
}

/// Display and output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Enable colored output
    #[serde(default = "default_color_output")]
    pub color_output: bool,

    /// Underline completed mentions in the input line
    #[serde(default = "default_highlighting")]
    pub highlighting: bool,

    /// Number of columns of the completion menu
    #[serde(default = "default_menu_columns")]
    pub menu_columns: u16,
}

/// Line history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of history entries
    #[serde(default = "default_max_history_size")]
    pub max_size: usize,

    /// Path to history file
    #[serde(default = "default_history_file")]
    pub file_path: PathBuf,

    /// Enable history persistence
    #[serde(default = "default_persist_history")]
    pub persist: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default)]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Top-level shape of a TOML options file
#[derive(Debug, Deserialize)]
struct OptionsDocument {
    options: Vec<MentionOption>,
}

// Default value functions
fn default_symbol() -> char {
    DEFAULT_SYMBOL
}

fn default_color_output() -> bool {
    true
}

fn default_highlighting() -> bool {
    true
}

fn default_menu_columns() -> u16 {
    4
}

fn default_max_history_size() -> usize {
    1000
}

fn default_history_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".mentionsh_history")
}

fn default_persist_history() -> bool {
    true
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

impl Default for MentionConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            reverse: false,
            options_file: None,
            options: Vec::new(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color_output: default_color_output(),
            highlighting: default_highlighting(),
            menu_columns: default_menu_columns(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_history_size(),
            file_path: default_history_file(),
            persist: default_persist_history(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the default configuration file path
    ///
    /// # Returns
    /// * `PathBuf` - Path to default configuration file
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".mentionsh")
            .join("config.toml")
    }

    /// Load configuration from a file
    ///
    /// Without an explicit path the default location is tried, and a missing
    /// default file yields the default configuration. A missing explicit file
    /// is an error.
    ///
    /// # Arguments
    /// * `path` - Explicit path to the configuration file (TOML format)
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound(path.display().to_string()).into());
                }
                Self::read(path)
            }
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::read(&path)
                } else {
                    tracing::debug!(path = %path.display(), "no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.history.file_path = expand_home(&config.history.file_path);
        if let Some(options_file) = config.mention.options_file.take() {
            config.mention.options_file = Some(expand_home(&options_file));
        }
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Serialize the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration to a file, creating parent directories
    ///
    /// # Arguments
    /// * `path` - Path where to save the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Success or error
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Validate the configuration
    ///
    /// # Returns
    /// * `Result<()>` - Ok if valid, error otherwise
    pub fn validate(&self) -> Result<()> {
        if is_separator(self.mention.symbol) {
            return Err(invalid_value("mention.symbol", self.mention.symbol.escape_default()));
        }
        if self.display.menu_columns == 0 {
            return Err(invalid_value("display.menu_columns", 0));
        }
        if self.history.max_size == 0 {
            return Err(invalid_value("history.max_size", 0));
        }
        Ok(())
    }

    /// Inline options followed by the options of `options_file`, if set
    pub fn load_options(&self) -> Result<Vec<MentionOption>> {
        let mut options = self.mention.options.clone();
        if let Some(path) = &self.mention.options_file {
            options.extend(load_options_file(path)?);
        }
        Ok(options)
    }

    /// Build engine settings from this configuration
    pub fn mention_settings(&self) -> Result<MentionSettings> {
        let options = self.load_options()?;
        tracing::info!(count = options.len(), symbol = %self.mention.symbol, "loaded mention options");
        Ok(MentionSettings::builder(options)
            .symbol(self.mention.symbol)
            .reverse(self.mention.reverse)
            .build())
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Load an option collection from a file
///
/// `.json` files hold an array of options; `.toml` files hold an `options`
/// array. Each option is either a label string or a record with a `name`.
///
/// # Arguments
/// * `path` - Path to the options file
///
/// # Returns
/// * `Result<Vec<MentionOption>>` - Options in file order
pub fn load_options_file(path: &Path) -> Result<Vec<MentionOption>> {
    let display = path.display().to_string();
    if !path.exists() {
        return Err(OptionsError::FileNotFound(display).into());
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let content = fs::read_to_string(path)?;

    let options = match extension.as_deref() {
        Some("json") => serde_json::from_str::<Vec<MentionOption>>(&content).map_err(|e| {
            OptionsError::Parse {
                path: display.clone(),
                message: e.to_string(),
            }
        })?,
        Some("toml") => {
            toml::from_str::<OptionsDocument>(&content)
                .map_err(|e| OptionsError::Parse {
                    path: display.clone(),
                    message: e.to_string(),
                })?
                .options
        }
        _ => return Err(OptionsError::UnsupportedFormat(display).into()),
    };

    let shown_path = &display;
    tracing::debug!(path = %shown_path, count = options.len(), "loaded options file");
    Ok(options)
}

/// Replace a leading `~` with the home directory
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

fn invalid_value(field: &str, value: impl ToString) -> crate::error::MentionshError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MentionshError;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.mention.symbol, '@');
        assert!(!config.mention.reverse);
        assert!(config.mention.options.is_empty());
        assert!(config.display.color_output);
        assert_eq!(config.display.menu_columns, 4);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::from_toml_str("[mention]\nsymbol = \"#\"\n").unwrap();
        assert_eq!(config.mention.symbol, '#');
        assert_eq!(config.history.max_size, 1000);
        assert!(config.display.highlighting);
    }

    #[test]
    fn test_inline_options() {
        let config = Config::from_toml_str(
            r#"
            [mention]
            options = ["alice", { name = "bob", id = 2 }]
            "#,
        )
        .unwrap();
        let options = config.load_options().unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0], MentionOption::from("alice"));
        assert_eq!(options[1].label(), "bob");
        assert_eq!(options[1].field("id"), Some(&serde_json::json!(2)));
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml_str("[mention\nsymbol = ").unwrap_err();
        assert!(matches!(err, MentionshError::Config(ConfigError::InvalidFormat(_))));
    }

    #[test]
    fn test_load_explicit_file() {
        let file = temp_file(".toml", "[display]\ncolor_output = false\n");
        let config = Config::load_from_file(Some(file.path())).unwrap();
        assert!(!config.display.color_output);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load_from_file(Some(dir.path().join("nope.toml").as_path())).unwrap_err();
        assert!(matches!(err, MentionshError::Config(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.mention.symbol = '#';
        config.mention.reverse = true;
        config.mention.options = vec!["rust".into(), "serde".into()];
        config.save(&path).unwrap();

        let loaded = Config::load_from_file(Some(path.as_path())).unwrap();
        assert_eq!(loaded.mention.symbol, '#');
        assert!(loaded.mention.reverse);
        assert_eq!(loaded.mention.options, config.mention.options);
    }

    #[test]
    fn test_validate_rejects_separator_symbol() {
        let mut config = Config::default();
        config.mention.symbol = ' ';
        assert!(matches!(
            config.validate(),
            Err(MentionshError::Config(ConfigError::InvalidValue { .. }))
        ));
        config.mention.symbol = '\n';
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        let mut config = Config::default();
        config.display.menu_columns = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.history.max_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_options_file_json() {
        let file = temp_file(".json", r#"["alice", {"name": "bob", "team": "core"}]"#);
        let options = load_options_file(file.path()).unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[1].field("team"), Some(&serde_json::json!("core")));
    }

    #[test]
    fn test_options_file_toml() {
        let file = temp_file(
            ".toml",
            "options = [\"alice\", { name = \"bob\" }]\n",
        );
        let options = load_options_file(file.path()).unwrap();
        assert_eq!(
            options.iter().map(|o| o.label()).collect::<Vec<_>>(),
            vec!["alice", "bob"]
        );
    }

    #[test]
    fn test_options_file_errors() {
        let csv = temp_file(".csv", "alice,bob");
        assert!(matches!(
            load_options_file(csv.path()),
            Err(MentionshError::Options(OptionsError::UnsupportedFormat(_)))
        ));

        let bad = temp_file(".json", r#"{"name": "not a list"}"#);
        assert!(matches!(
            load_options_file(bad.path()),
            Err(MentionshError::Options(OptionsError::Parse { .. }))
        ));

        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load_options_file(&dir.path().join("missing.json")),
            Err(MentionshError::Options(OptionsError::FileNotFound(_)))
        ));
    }

    #[test]
    fn test_options_file_appended_after_inline() {
        let file = temp_file(".json", r#"["carol"]"#);
        let mut config = Config::default();
        config.mention.options = vec!["alice".into()];
        config.mention.options_file = Some(file.path().to_path_buf());

        let settings = config.mention_settings().unwrap();
        let labels: Vec<&str> = settings.options().iter().map(|o| o.label()).collect();
        assert_eq!(labels, vec!["alice", "carol"]);
    }

    #[test]
    fn test_expand_home() {
        let plain = Path::new("/tmp/history");
        assert_eq!(expand_home(plain), PathBuf::from("/tmp/history"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(Path::new("~/h")), home.join("h"));
        }
    }
}
