//! REPL (Read-Eval-Print Loop) for mentionsh
//!
//! This module hosts the mention engine in an interactive line editor:
//! - Tab completion of the mention token at the cursor
//! - Inline hint with the rest of the hovered candidate
//! - Underlined completed mentions
//! - Persistent line history
//! - JSON output of the mentions of every submitted line

pub mod completer;
pub mod engine;
pub mod highlighter;
pub mod hinter;
pub mod prompt;
pub mod shared_state;

pub use completer::MentionCompleter;
pub use engine::{
    LineOutcome, ReplCommand, ReplEngine, completion_keybindings, process_line, respond,
};
pub use highlighter::MentionHighlighter;
pub use hinter::MentionHinter;
pub use prompt::MentionPrompt;
pub use shared_state::SharedState;

#[cfg(test)]
mod tests;
