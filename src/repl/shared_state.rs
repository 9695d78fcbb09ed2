use std::sync::{Arc, PoisonError, RwLock};

use crate::config::DisplayConfig;
use crate::mention::MentionSettings;

/// State shared between the REPL loop and the editor components.
#[derive(Debug, Clone)]
pub struct SharedState {
    /// Mention settings used by the completer, hinter and highlighter
    settings: Arc<MentionSettings>,

    /// Color output setting
    pub color_enabled: Arc<RwLock<bool>>,

    /// Underline completed mentions in the input line
    pub highlighting_enabled: bool,

    /// Number of mentions collected from submitted lines
    pub mentions_collected: Arc<RwLock<usize>>,
}

impl SharedState {
    /// Create a new shared state.
    ///
    /// * `settings` - Mention settings for this session
    pub fn new(settings: Arc<MentionSettings>) -> Self {
        Self::with_config(settings, &DisplayConfig::default())
    }

    /// Create a new shared state with display configuration.
    ///
    /// * `settings` - Mention settings for this session
    /// * `display_config` - Display configuration settings
    pub fn with_config(settings: Arc<MentionSettings>, display_config: &DisplayConfig) -> Self {
        Self {
            settings,
            color_enabled: Arc::new(RwLock::new(display_config.color_output)),
            highlighting_enabled: display_config.highlighting,
            mentions_collected: Arc::new(RwLock::new(0)),
        }
    }

    /// Mention settings.
    pub fn settings(&self) -> Arc<MentionSettings> {
        Arc::clone(&self.settings)
    }

    /// Get current color setting.
    pub fn get_color_enabled(&self) -> bool {
        *self.color_enabled.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Set color output.
    pub fn set_color_enabled(&self, enabled: bool) {
        *self.color_enabled.write().unwrap_or_else(PoisonError::into_inner) = enabled;
    }

    /// Total mentions collected so far.
    pub fn get_mentions_collected(&self) -> usize {
        *self
            .mentions_collected
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Add to the collected mention count.
    pub fn record_mentions(&self, count: usize) {
        *self
            .mentions_collected
            .write()
            .unwrap_or_else(PoisonError::into_inner) += count;
    }
}
