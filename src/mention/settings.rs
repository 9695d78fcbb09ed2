//! Engine configuration
//!
//! `MentionSettings` bundles the read-only inputs of a mention engine: the
//! trigger symbol, the option collection, the match predicate and the display
//! template. It is shared between engines and editor components through `Arc`.

use std::fmt;

use super::matcher::{MatchPredicate, PrefixMatcher};
use super::option::{MentionOption, default_template};

/// Display template turning an option into the label shown in the option list
pub type TemplateFn = Box<dyn Fn(&MentionOption) -> String + Send + Sync>;

/// Default trigger symbol
pub const DEFAULT_SYMBOL: char = '@';

/// Read-only configuration of a mention engine
pub struct MentionSettings {
    symbol: char,
    options: Vec<MentionOption>,
    matcher: Box<dyn MatchPredicate>,
    template: TemplateFn,
    reverse: bool,
}

impl MentionSettings {
    /// Create settings with default symbol, matcher and template
    pub fn new(options: Vec<MentionOption>) -> Self {
        Self::builder(options).build()
    }

    /// Start building settings over the given options
    pub fn builder(options: Vec<MentionOption>) -> MentionSettingsBuilder {
        MentionSettingsBuilder {
            symbol: DEFAULT_SYMBOL,
            options,
            matcher: None,
            template: None,
            reverse: false,
        }
    }

    /// Trigger symbol
    pub fn symbol(&self) -> char {
        self.symbol
    }

    /// All options in display order
    pub fn options(&self) -> &[MentionOption] {
        &self.options
    }

    /// The configured match predicate
    pub fn matcher(&self) -> &dyn MatchPredicate {
        self.matcher.as_ref()
    }

    /// Whether the option list is displayed above the input
    pub fn reverse(&self) -> bool {
        self.reverse
    }

    /// Label shown for an option in the option list
    pub fn display_label(&self, option: &MentionOption) -> String {
        (self.template)(option)
    }

    /// First option whose canonical label equals `label` exactly
    pub fn find_by_label(&self, label: &str) -> Option<&MentionOption> {
        self.options.iter().find(|option| option.label() == label)
    }
}

impl Default for MentionSettings {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl fmt::Debug for MentionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MentionSettings")
            .field("symbol", &self.symbol)
            .field("options", &self.options)
            .field("reverse", &self.reverse)
            .field("matcher", &"<predicate>")
            .field("template", &"<template>")
            .finish()
    }
}

/// Builder for [`MentionSettings`]
pub struct MentionSettingsBuilder {
    symbol: char,
    options: Vec<MentionOption>,
    matcher: Option<Box<dyn MatchPredicate>>,
    template: Option<TemplateFn>,
    reverse: bool,
}

impl MentionSettingsBuilder {
    /// Set the trigger symbol
    pub fn symbol(mut self, symbol: char) -> Self {
        self.symbol = symbol;
        self
    }

    /// Replace the default prefix matcher
    pub fn matcher(mut self, matcher: impl MatchPredicate + 'static) -> Self {
        self.matcher = Some(Box::new(matcher));
        self
    }

    /// Replace the default display template
    pub fn template(
        mut self,
        template: impl Fn(&MentionOption) -> String + Send + Sync + 'static,
    ) -> Self {
        self.template = Some(Box::new(template));
        self
    }

    /// Display the option list above the input
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Finish building
    ///
    /// Without an explicit matcher, a [`PrefixMatcher`] for the final symbol is used.
    pub fn build(self) -> MentionSettings {
        let symbol = self.symbol;
        MentionSettings {
            symbol,
            options: self.options,
            matcher: self
                .matcher
                .unwrap_or_else(|| Box::new(PrefixMatcher::new(symbol))),
            template: self.template.unwrap_or_else(|| Box::new(default_template)),
            reverse: self.reverse,
        }
    }
}
