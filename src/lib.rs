//! Mention autocompletion library
//!
//! This library provides a toolkit-independent engine for `@mention`
//! autocompletion in plain text inputs, the overlay markup that marks
//! completed mentions, and a terminal host built on a line editor.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `formatter`: Overlay markup and JSON output
//! - `mention`: Token scanning, matching, state machine and engine
//! - `repl`: Interactive line editor
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use mentionsh::{MentionEngine, MentionOption, MentionSettings};
//!
//! let settings = MentionSettings::new(vec![
//!     MentionOption::record("alice").with_field("id", 1),
//!     MentionOption::from("bob"),
//! ]);
//! let mut engine = MentionEngine::new(Arc::new(settings));
//!
//! engine.on_text_changed("hi @ali", 7);
//! assert!(engine.is_composing());
//!
//! let commit = engine.commit_hovered().unwrap();
//! assert_eq!(commit.text, "hi @alice ");
//! assert_eq!(commit.cursor, 10);
//! assert_eq!(engine.collect()[0].label(), "alice");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod mention;
pub mod repl;

// Re-export commonly used types
pub use config::Config;
pub use error::{MentionshError, Result};
pub use formatter::{JsonFormatter, extract_mentions, render};
pub use mention::{
    Commit, CommitError, Direction, MentionEngine, MentionOption, MentionSettings, MentionState,
};
pub use repl::{ReplEngine, SharedState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
