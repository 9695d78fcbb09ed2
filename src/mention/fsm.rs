//! State machine for mention composition
//!
//! The engine is either idle or composing a mention. Composition is decided
//! purely from the token under the cursor, and candidate navigation is a small
//! wrap-around walk over the filtered list.

use super::token_stream::{Token, is_mention_start};

/// Engine modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MentionState {
    /// No mention token under the cursor, option list hidden
    #[default]
    Idle,
    /// A mention token is under the cursor, option list shown
    Composing,
}

impl MentionState {
    /// Classify the token under the cursor
    ///
    /// The token must be non-empty, begin with the trigger symbol and sit at
    /// the start of `text` or right after a separator, so `hi@bob` stays idle.
    pub fn classify(text: &str, token: Option<&Token>, symbol: char) -> Self {
        match token {
            Some(token) if !token.text.is_empty() && is_mention_start(text, token.start, symbol) => {
                MentionState::Composing
            }
            _ => MentionState::Idle,
        }
    }

    /// Check if this is the composing state
    pub fn is_composing(self) -> bool {
        matches!(self, MentionState::Composing)
    }
}

/// Navigation direction over the candidate list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Previous candidate (-1)
    Up,
    /// Reset to the first candidate (0)
    #[default]
    Stay,
    /// Next candidate (+1)
    Down,
}

impl Direction {
    /// Swap up and down, used when the option list is drawn above the input
    pub fn inverted(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Stay => Direction::Stay,
            Direction::Down => Direction::Up,
        }
    }

    /// Compute the next hover index
    ///
    /// `count` must be non-zero. `Stay` resets to 0; `Up` and `Down` wrap in
    /// both directions.
    pub fn step(self, hover: usize, count: usize) -> usize {
        debug_assert!(count > 0);
        let hover = hover.min(count - 1);
        match self {
            Direction::Stay => 0,
            Direction::Down => (hover + 1) % count,
            Direction::Up => (hover + count - 1) % count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let text = "hi @ali";
        let mention = Token::new("@ali", 3);
        let word = Token::new("hi", 0);
        assert_eq!(MentionState::classify(text, Some(&mention), '@'), MentionState::Composing);
        assert_eq!(MentionState::classify(text, Some(&word), '@'), MentionState::Idle);
        assert_eq!(MentionState::classify(text, None, '@'), MentionState::Idle);
        assert_eq!(MentionState::classify(text, Some(&mention), '#'), MentionState::Idle);
    }

    #[test]
    fn test_classify_requires_separator_before_symbol() {
        let text = "hi@bob";
        let glued = Token::new("@bob", 2);
        assert_eq!(MentionState::classify(text, Some(&glued), '@'), MentionState::Idle);
        let whole = Token::new("hi@bob", 0);
        assert_eq!(MentionState::classify(text, Some(&whole), '@'), MentionState::Idle);
    }

    #[test]
    fn test_step_wraps() {
        assert_eq!(Direction::Up.step(0, 3), 2);
        assert_eq!(Direction::Down.step(2, 3), 0);
        assert_eq!(Direction::Down.step(0, 3), 1);
        assert_eq!(Direction::Up.step(2, 3), 1);
        assert_eq!(Direction::Stay.step(2, 3), 0);
    }

    #[test]
    fn test_step_single_candidate() {
        assert_eq!(Direction::Up.step(0, 1), 0);
        assert_eq!(Direction::Down.step(0, 1), 0);
    }

    #[test]
    fn test_step_clamps_stale_hover() {
        assert_eq!(Direction::Down.step(7, 3), 0);
    }

    #[test]
    fn test_inverted() {
        assert_eq!(Direction::Up.inverted(), Direction::Down);
        assert_eq!(Direction::Down.inverted(), Direction::Up);
        assert_eq!(Direction::Stay.inverted(), Direction::Stay);
    }
}
