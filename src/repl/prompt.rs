//! Custom prompt implementation for mentionsh

use std::borrow::Cow;

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

/// Prompt showing the trigger symbol and the number of options
pub struct MentionPrompt {
    /// Trigger symbol
    symbol: char,
    /// Number of options available
    option_count: usize,
}

impl MentionPrompt {
    /// Create a new mention prompt
    ///
    /// # Arguments
    /// * `symbol` - Trigger symbol
    /// * `option_count` - Number of options available
    ///
    /// # Returns
    /// * `Self` - New prompt
    pub fn new(symbol: char, option_count: usize) -> Self {
        Self {
            symbol,
            option_count,
        }
    }
}

impl Prompt for MentionPrompt {
    /// Render the left prompt (main prompt)
    fn render_prompt_left(&self) -> Cow<'_, str> {
        format!("{}{}> ", self.symbol, self.option_count).into()
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        "".into()
    }

    /// Render the prompt indicator (empty since it is part of the left prompt)
    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<'_, str> {
        "".into()
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        "... ".into()
    }

    /// Render the history search prompt
    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        format!("({}reverse-search: {}) ", prefix, history_search.term).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_prompt() {
        let prompt = MentionPrompt::new('@', 3);
        assert_eq!(prompt.render_prompt_left(), "@3> ");
    }

    #[test]
    fn test_custom_symbol_prompt() {
        let prompt = MentionPrompt::new('#', 0);
        assert_eq!(prompt.render_prompt_left(), "#0> ");
    }

    #[test]
    fn test_right_prompt_and_indicator_empty() {
        let prompt = MentionPrompt::new('@', 3);
        assert_eq!(prompt.render_prompt_right(), "");
        assert_eq!(prompt.render_prompt_indicator(PromptEditMode::Default), "");
    }

    #[test]
    fn test_multiline_indicator() {
        let prompt = MentionPrompt::new('@', 3);
        assert_eq!(prompt.render_prompt_multiline_indicator(), "... ");
    }
}
