//! Error handling module for mentionsh.
//!
//! The engine itself never fails: commits that cannot happen are reported
//! through [`crate::mention::CommitError`] and treated as no-ops by hosts.
//! The errors here cover the surrounding application:
//! - Configuration loading and validation
//! - Option collection files
//! - The line editor and terminal I/O
//!
//! # Example
//!
//! ```rust,no_run
//! use mentionsh::config::Config;
//! use mentionsh::error::Result;
//!
//! fn load() -> Result<Config> {
//!     let config = Config::load_from_file(None)?;
//!     config.validate()?;
//!     Ok(config)
//! }
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{ConfigError, MentionshError, OptionsError, Result};
