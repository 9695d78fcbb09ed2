//! Mention composition core
//!
//! This module turns a plain text input into a mention-aware one:
//! - `token_stream`: locating separator-delimited tokens around a cursor
//! - `matcher`: deciding which options match the in-progress token
//! - `fsm`: idle/composing states and candidate navigation
//! - `settings`: symbol, options, predicate and display template
//! - `engine`: the orchestrator driven by host events
//!
//! The core is independent of any terminal or widget toolkit; the REPL in
//! [`crate::repl`] is one host.

pub mod engine;
pub mod fsm;
pub mod matcher;
pub mod option;
pub mod settings;
pub mod token_stream;

pub use engine::{
    Commit, CommitError, EditorKey, EngineState, KeyOutcome, MentionEngine, OptionView,
    UpdateHook,
};
pub use fsm::{Direction, MentionState};
pub use matcher::{MatchPredicate, PrefixMatcher, filter};
pub use option::{MentionOption, default_template};
pub use settings::{DEFAULT_SYMBOL, MentionSettings, MentionSettingsBuilder, TemplateFn};
pub use token_stream::{Token, find_all_tokens, find_token_at, is_separator};
