//! Completer for reedline - offers mention candidates for the token at the cursor

use std::sync::Arc;

use reedline::{Completer, Span, Suggestion};

use crate::mention::{MentionEngine, MentionSettings};

/// Mention completer for reedline
pub struct MentionCompleter {
    /// Engine tracking the line being edited
    engine: MentionEngine,
}

impl MentionCompleter {
    /// Create a new mention completer
    ///
    /// # Arguments
    /// * `settings` - Mention settings
    ///
    /// # Returns
    /// * `Self` - New completer
    pub fn new(settings: Arc<MentionSettings>) -> Self {
        Self {
            engine: MentionEngine::new(settings),
        }
    }
}

impl Completer for MentionCompleter {
    /// Complete the input at the given cursor position
    ///
    /// Each candidate replaces the whole in-progress token, not only the part
    /// before the cursor, and brings its trailing space along.
    ///
    /// # Arguments
    /// * `line` - The input line
    /// * `pos` - Cursor position (byte index)
    ///
    /// # Returns
    /// * `Vec<Suggestion>` - One suggestion per candidate, empty when idle
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        self.engine.on_text_changed(line, pos);
        if !self.engine.is_composing() {
            return Vec::new();
        }

        let settings = self.engine.settings();
        self.engine
            .candidates()
            .into_iter()
            .filter_map(|option| {
                let commit = self.engine.preview_commit(option).ok()?;
                let label = settings.display_label(option);
                Some(Suggestion {
                    value: commit.replacement,
                    description: (label != option.label()).then_some(label),
                    span: Span::new(commit.replaced.start, commit.replaced.end),
                    append_whitespace: false,
                    ..Default::default()
                })
            })
            .collect()
    }
}
