//! Hinter for reedline - shows the rest of the hovered candidate inline

use std::sync::Arc;

use nu_ansi_term::{Color, Style};
use reedline::{Hinter, History};

use crate::mention::{MentionEngine, MentionSettings};

/// Mention hinter for reedline
pub struct MentionHinter {
    /// Engine tracking the line being edited
    engine: MentionEngine,
    /// Style for hints
    style: Style,
    /// Current hint text
    current_hint: String,
}

impl MentionHinter {
    /// Create a new mention hinter with default style
    ///
    /// # Returns
    /// * `Self` - New hinter
    pub fn new(settings: Arc<MentionSettings>) -> Self {
        Self {
            engine: MentionEngine::new(settings),
            style: Style::new().italic().fg(Color::DarkGray),
            current_hint: String::new(),
        }
    }

    /// Remainder of the hovered candidate after what has been typed
    fn remainder(&self) -> Option<String> {
        let token = self.engine.in_progress()?;
        let option = self.engine.hovered()?;
        let typed = token.stripped(self.engine.settings().symbol());
        option
            .label()
            .strip_prefix(typed)
            .map(|rest| format!("{rest} "))
    }
}

impl Hinter for MentionHinter {
    /// Provide a hint for the current line
    ///
    /// Hints only appear with the cursor at the end of a mention token.
    ///
    /// # Arguments
    /// * `line` - The current input line
    /// * `pos` - Cursor position
    /// * `_history` - Line history (unused)
    /// * `use_ansi_coloring` - Whether to use ANSI colors
    /// * `_cwd` - Current working directory (unused)
    ///
    /// # Returns
    /// * `String` - Hint text to display after the cursor
    fn handle(
        &mut self,
        line: &str,
        pos: usize,
        _history: &dyn History,
        use_ansi_coloring: bool,
        _cwd: &str,
    ) -> String {
        self.current_hint.clear();
        self.engine.on_text_changed(line, pos);

        let at_token_end = self
            .engine
            .in_progress()
            .is_some_and(|token| token.end() == pos);
        if !at_token_end {
            return String::new();
        }

        let Some(hint) = self.remainder() else {
            return String::new();
        };
        self.current_hint = hint;

        if use_ansi_coloring {
            self.style.paint(&self.current_hint).to_string()
        } else {
            self.current_hint.clone()
        }
    }

    /// Return the complete hint
    fn complete_hint(&self) -> String {
        self.current_hint.clone()
    }

    /// Return the next hint token
    fn next_hint_token(&self) -> String {
        self.current_hint.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reedline::FileBackedHistory;

    fn create_test_hinter() -> MentionHinter {
        MentionHinter::new(Arc::new(MentionSettings::new(vec![
            "alice".into(),
            "albert".into(),
        ])))
    }

    fn create_test_history() -> Box<dyn History> {
        Box::new(FileBackedHistory::new(10).expect("in-memory history"))
    }

    #[test]
    fn test_hint_completes_hovered_candidate() {
        let mut hinter = create_test_hinter();
        let history = create_test_history();
        let hint = hinter.handle("hi @al", 6, history.as_ref(), false, "/tmp");
        assert_eq!(hint, "ice ");
        assert_eq!(hinter.complete_hint(), "ice ");
    }

    #[test]
    fn test_colored_hint_contains_text() {
        let mut hinter = create_test_hinter();
        let history = create_test_history();
        let hint = hinter.handle("@alb", 4, history.as_ref(), true, "/tmp");
        assert!(hint.contains("ert "));
        assert_ne!(hint, "ert ");
        assert_eq!(hinter.complete_hint(), "ert ");
    }

    #[test]
    fn test_no_hint_outside_mentions() {
        let mut hinter = create_test_hinter();
        let history = create_test_history();
        assert_eq!(hinter.handle("hello", 5, history.as_ref(), false, "/tmp"), "");
        assert_eq!(hinter.handle("", 0, history.as_ref(), false, "/tmp"), "");
        assert_eq!(hinter.complete_hint(), "");
    }

    #[test]
    fn test_no_hint_in_middle_of_token() {
        let mut hinter = create_test_hinter();
        let history = create_test_history();
        assert_eq!(hinter.handle("@al", 2, history.as_ref(), false, "/tmp"), "");
    }

    #[test]
    fn test_no_hint_without_candidates() {
        let mut hinter = create_test_hinter();
        let history = create_test_history();
        assert_eq!(hinter.handle("@zed", 4, history.as_ref(), false, "/tmp"), "");
    }

    #[test]
    fn test_full_label_hints_trailing_space() {
        let mut hinter = create_test_hinter();
        let history = create_test_history();
        assert_eq!(hinter.handle("@alice", 6, history.as_ref(), false, "/tmp"), " ");
    }
}
