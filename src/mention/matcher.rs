//! Candidate matching
//!
//! This module provides the trait used to decide which options match the
//! in-progress token, the default prefix matcher, and the order-preserving
//! filter built on top of it.

use super::option::MentionOption;

/// Trait for deciding whether an option matches the token being typed
///
/// `query` is the in-progress token exactly as typed, including its leading
/// trigger symbol. Any `Fn(&str, &MentionOption) -> bool` closure that is
/// `Send + Sync` implements this trait.
pub trait MatchPredicate: Send + Sync {
    /// Check if `option` should be offered for `query`
    fn matches(&self, query: &str, option: &MentionOption) -> bool;
}

impl<F> MatchPredicate for F
where
    F: Fn(&str, &MentionOption) -> bool + Send + Sync,
{
    fn matches(&self, query: &str, option: &MentionOption) -> bool {
        self(query, option)
    }
}

/// Default matcher: case-sensitive prefix match on the canonical label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixMatcher {
    /// Trigger symbol stripped from the query before comparing
    symbol: char,
}

impl PrefixMatcher {
    /// Create a prefix matcher for the given trigger symbol
    pub fn new(symbol: char) -> Self {
        Self { symbol }
    }

    /// Remove one leading trigger symbol from the query
    fn strip<'q>(&self, query: &'q str) -> &'q str {
        query.strip_prefix(self.symbol).unwrap_or(query)
    }
}

impl Default for PrefixMatcher {
    fn default() -> Self {
        Self::new('@')
    }
}

impl MatchPredicate for PrefixMatcher {
    fn matches(&self, query: &str, option: &MentionOption) -> bool {
        let query = self.strip(query);
        query.is_empty() || option.label().starts_with(query)
    }
}

/// Filter options with a predicate, preserving input order
///
/// # Arguments
/// * `predicate` - Matching predicate
/// * `query` - The in-progress token
/// * `options` - All options, in display order
///
/// # Returns
/// * `Vec<usize>` - Indices into `options` of every matching option
pub fn filter(predicate: &dyn MatchPredicate, query: &str, options: &[MentionOption]) -> Vec<usize> {
    options
        .iter()
        .enumerate()
        .filter(|(_, option)| predicate.matches(query, option))
        .map(|(idx, _)| idx)
        .collect()
}
