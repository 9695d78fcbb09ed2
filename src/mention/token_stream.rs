//! Token scanning with cursor awareness
//!
//! This module finds the word under the text cursor and enumerates every
//! symbol-prefixed token in a text. A token is a maximal run of non-separator
//! characters; separators are the space character and line breaks.
//!
//! All offsets are byte offsets into the UTF-8 text, which is what line editors
//! report as the cursor position. Every function here is total: empty text,
//! text made only of separators, or text without the trigger symbol all yield
//! empty results.

use std::iter;
use std::ops::Range;

/// A contiguous run of non-separator characters and its start offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token text, never contains a separator
    pub text: String,
    /// Byte offset of the first character
    pub start: usize,
}

impl Token {
    /// Create a new token
    pub fn new(text: impl Into<String>, start: usize) -> Self {
        Self {
            text: text.into(),
            start,
        }
    }

    /// Byte offset one past the last character
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// Get the span (position range) of this token
    pub fn span(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Check whether the cursor sits inside or at either edge of the token
    pub fn contains(&self, cursor: usize) -> bool {
        self.start <= cursor && cursor <= self.end()
    }

    /// Check if the token begins with the trigger symbol
    pub fn starts_with_symbol(&self, symbol: char) -> bool {
        self.text.starts_with(symbol)
    }

    /// The token text with one leading trigger symbol removed
    pub fn stripped(&self, symbol: char) -> &str {
        self.text.strip_prefix(symbol).unwrap_or(&self.text)
    }
}

/// Check if a character is a line break
#[inline]
pub fn is_line_ending(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

/// Check if a character separates tokens
///
/// Line breaks are folded into the same class as the space so callers never
/// need to special-case them.
#[inline]
pub fn is_separator(ch: char) -> bool {
    ch == ' ' || is_line_ending(ch)
}

/// Clamp a byte offset to the text length and to the nearest char boundary at or before it
pub fn clamp_to_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while offset > 0 && !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Check whether a token starting at `start` may open a mention
///
/// The character at `start` must be the trigger symbol and it must sit at the
/// start of the text or right after a separator.
pub fn is_mention_start(text: &str, start: usize, symbol: char) -> bool {
    if !text.is_char_boundary(start) || !text[start..].starts_with(symbol) {
        return false;
    }
    text[..start]
        .chars()
        .next_back()
        .is_none_or(is_separator)
}

/// Find the token under the cursor
///
/// Scans backward from the cursor to the previous separator (or the start of
/// the text) and forward from there to the next separator (or the end).
///
/// # Arguments
/// * `text` - The text to scan
/// * `cursor` - Cursor position (byte index), clamped into the text
///
/// # Returns
/// * `Option<Token>` - The token whose span contains the cursor, `None` when empty
pub fn find_token_at(text: &str, cursor: usize) -> Option<Token> {
    let cursor = clamp_to_char_boundary(text, cursor);

    let start = text[..cursor]
        .char_indices()
        .rfind(|(_, c)| is_separator(*c))
        .map(|(idx, c)| idx + c.len_utf8())
        .unwrap_or(0);

    let end = text[start..]
        .char_indices()
        .find(|(_, c)| is_separator(*c))
        .map(|(idx, _)| start + idx)
        .unwrap_or(text.len());

    if start >= end {
        return None;
    }

    Some(Token::new(&text[start..end], start))
}

/// Find every symbol-prefixed token in the text
///
/// A token opens on the trigger symbol when it follows a separator or the
/// start of the text, then keeps every non-separator character up to the next
/// separator. A virtual separator after the last character closes a token that
/// runs to the end of the text.
///
/// # Arguments
/// * `text` - The text to scan
/// * `symbol` - Trigger symbol
///
/// # Returns
/// * `Vec<Token>` - Tokens in left-to-right order
pub fn find_all_tokens(text: &str, symbol: char) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current: Option<usize> = None;
    let mut after_separator = true;

    for (idx, ch) in text.char_indices().chain(iter::once((text.len(), ' '))) {
        if is_separator(ch) {
            if let Some(start) = current.take() {
                tokens.push(Token::new(&text[start..idx], start));
            }
            after_separator = true;
            continue;
        }

        if current.is_none() && after_separator && ch == symbol {
            current = Some(idx);
        }
        after_separator = false;
    }

    tracing::trace!(count = tokens.len(), "scanned mention tokens");
    tokens
}
