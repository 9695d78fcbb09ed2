//! Mention highlighter for the input line
//!
//! Completed mentions (tokens whose label matches an option exactly) are
//! underlined, and the mention being composed under the cursor is colored.

use std::sync::Arc;

use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

use crate::mention::{MentionSettings, find_all_tokens, find_token_at};

/// Highlighter marking mentions in the input line
pub struct MentionHighlighter {
    settings: Arc<MentionSettings>,
    enabled: bool,
    mention_style: Style,
    composing_style: Style,
}

impl MentionHighlighter {
    /// Create a new mention highlighter
    pub fn new(settings: Arc<MentionSettings>, enabled: bool) -> Self {
        Self {
            settings,
            enabled,
            mention_style: Style::new().fg(Color::Cyan).underline(),
            composing_style: Style::new().fg(Color::Yellow),
        }
    }
}

impl Highlighter for MentionHighlighter {
    fn highlight(&self, line: &str, cursor: usize) -> StyledText {
        let mut styled = StyledText::new();
        if !self.enabled {
            styled.push((Style::default(), line.to_string()));
            return styled;
        }

        let symbol = self.settings.symbol();
        let composing_start = find_token_at(line, cursor)
            .filter(|token| token.starts_with_symbol(symbol))
            .map(|token| token.start);

        let mut copied = 0;
        for token in find_all_tokens(line, symbol) {
            let style = if self.settings.find_by_label(token.stripped(symbol)).is_some() {
                self.mention_style
            } else if composing_start == Some(token.start) {
                self.composing_style
            } else {
                continue;
            };

            if copied < token.start {
                styled.push((Style::default(), line[copied..token.start].to_string()));
            }
            styled.push((style, token.text.clone()));
            copied = token.end();
        }

        if copied < line.len() {
            styled.push((Style::default(), line[copied..].to_string()));
        }
        styled
    }
}
