//! Mention engine - orchestrates the mention flow
//!
//! The engine ties the scanner, the matcher and the state machine together. The
//! host reports every text change, cursor move and key press; the engine keeps
//! the visibility flag, the filtered candidate list and the hover index, and on
//! commit computes the replacement text and the new cursor offset.
//!
//! Every operation runs to completion on the calling thread and returns the new
//! state, so a host can drive the engine from any event loop.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use super::fsm::{Direction, MentionState};
use super::matcher::filter;
use super::option::MentionOption;
use super::settings::MentionSettings;
use super::token_stream::{Token, clamp_to_char_boundary, find_token_at};
use crate::formatter::markup::{extract_mentions, render};

/// Callback run after every text change and every successful commit
pub type UpdateHook = Box<dyn FnMut(&EngineState) + Send>;

/// Observable engine state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EngineState {
    /// Cursor position (byte index)
    pub cursor: usize,
    /// Mention token under the cursor, if any
    pub in_progress: Option<Token>,
    /// Whether the option list should be shown
    pub options_visible: bool,
    /// Indices into the options of every current candidate
    pub candidates: Vec<usize>,
    /// Index into `candidates` of the hovered candidate
    pub hover: usize,
    /// Direction of the last navigation
    pub direction: Direction,
}

impl EngineState {
    /// Current mode
    pub fn mode(&self) -> MentionState {
        if self.options_visible {
            MentionState::Composing
        } else {
            MentionState::Idle
        }
    }
}

/// Result of a commit, to be applied by the host in one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Full text after the replacement
    pub text: String,
    /// Cursor position after the replacement
    pub cursor: usize,
    /// Byte range of the original text that was replaced
    pub replaced: Range<usize>,
    /// Inserted text: symbol, label and a trailing space
    pub replacement: String,
}

/// Reasons a commit did not happen; hosts treat both as no-ops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitError {
    /// No mention is being composed
    InvalidState,
    /// The candidate list is empty
    NoSelection,
}

impl fmt::Display for CommitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitError::InvalidState => write!(f, "No mention is being composed"),
            CommitError::NoSelection => write!(f, "No candidate to select"),
        }
    }
}

impl std::error::Error for CommitError {}

/// Host key events the engine cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    Up,
    Down,
    Enter,
    Other,
}

/// What the host should do after a key event
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyOutcome {
    /// The host must suppress the key's default action
    pub handled: bool,
    /// Commit to apply, when the key selected a candidate
    pub commit: Option<Commit>,
}

/// A candidate as drawn in the option list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    /// Index into the options
    pub index: usize,
    /// Label produced by the display template
    pub label: String,
    /// Whether this candidate is hovered
    pub hovered: bool,
}

/// Main mention engine
pub struct MentionEngine {
    /// Shared read-only configuration
    settings: Arc<MentionSettings>,
    /// Last text reported by the host
    text: String,
    /// Mutable engine state
    state: EngineState,
    /// Optional change notification
    on_update: Option<UpdateHook>,
}

impl MentionEngine {
    /// Create a new idle engine
    ///
    /// # Arguments
    /// * `settings` - Options, symbol, predicate and template
    pub fn new(settings: Arc<MentionSettings>) -> Self {
        Self {
            settings,
            text: String::new(),
            state: EngineState::default(),
            on_update: None,
        }
    }

    /// Register a callback run after every text change and successful commit
    pub fn with_update_hook(mut self, hook: impl FnMut(&EngineState) + Send + 'static) -> Self {
        self.on_update = Some(Box::new(hook));
        self
    }

    pub fn settings(&self) -> &MentionSettings {
        &self.settings
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Last text reported by the host, or produced by a commit
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    pub fn is_composing(&self) -> bool {
        self.state.mode().is_composing()
    }

    /// Mention token under the cursor
    pub fn in_progress(&self) -> Option<&Token> {
        self.state.in_progress.as_ref()
    }

    /// Current candidates in display order
    pub fn candidates(&self) -> Vec<&MentionOption> {
        let options = self.settings.options();
        self.state
            .candidates
            .iter()
            .filter_map(|&idx| options.get(idx))
            .collect()
    }

    /// The hovered candidate, if any
    pub fn hovered(&self) -> Option<&MentionOption> {
        self.state
            .candidates
            .get(self.state.hover)
            .and_then(|&idx| self.settings.options().get(idx))
    }

    /// Candidates prepared for drawing, empty when idle
    ///
    /// With a reversed option list the views come last-to-first so the first
    /// candidate sits closest to the input.
    pub fn option_views(&self) -> Vec<OptionView> {
        if !self.is_composing() {
            return Vec::new();
        }

        let options = self.settings.options();
        let mut views: Vec<OptionView> = self
            .state
            .candidates
            .iter()
            .enumerate()
            .filter_map(|(pos, &index)| {
                options.get(index).map(|option| OptionView {
                    index,
                    label: self.settings.display_label(option),
                    hovered: pos == self.state.hover,
                })
            })
            .collect();

        if self.settings.reverse() {
            views.reverse();
        }
        views
    }

    /// Recompute the mention token and candidates for a new cursor position
    ///
    /// # Arguments
    /// * `text` - Current text of the input surface
    /// * `cursor` - Cursor position (byte index)
    ///
    /// # Returns
    /// * `&EngineState` - The updated state
    pub fn on_cursor_moved(&mut self, text: &str, cursor: usize) -> &EngineState {
        if self.text != text {
            self.text = text.to_string();
        }
        let cursor = clamp_to_char_boundary(&self.text, cursor);
        self.state.cursor = cursor;

        let symbol = self.settings.symbol();
        let token = find_token_at(&self.text, cursor).filter(|token| {
            MentionState::classify(&self.text, Some(token), symbol).is_composing()
        });
        match token {
            Some(token) => {
                self.state.candidates =
                    filter(self.settings.matcher(), &token.text, self.settings.options());
                if self.state.hover >= self.state.candidates.len() {
                    self.state.hover = 0;
                }
                if !self.state.options_visible {
                    tracing::debug!(token = %token.text, start = token.start, "composing mention");
                }
                self.state.options_visible = true;
                self.state.in_progress = Some(token);
            }
            None => self.go_idle(cursor),
        }

        &self.state
    }

    /// Handle an edit: recompute, then reset the hover to the first candidate
    pub fn on_text_changed(&mut self, text: &str, cursor: usize) -> &EngineState {
        self.on_cursor_moved(text, cursor);
        self.on_navigate(Direction::Stay);
        self.notify();
        &self.state
    }

    /// Move the hover over the candidate list
    ///
    /// No-op unless composing with at least one candidate.
    pub fn on_navigate(&mut self, direction: Direction) -> &EngineState {
        let count = self.state.candidates.len();
        if !self.is_composing() || count == 0 {
            return &self.state;
        }

        self.state.hover = direction.step(self.state.hover, count);
        self.state.direction = direction;
        tracing::trace!(hover = self.state.hover, count, ?direction, "navigated candidates");
        &self.state
    }

    /// Handle a key event the way an option list under a text input does
    ///
    /// Arrow keys move the hover (inverted for a reversed list) and are
    /// swallowed while composing. Enter commits the hovered candidate while
    /// composing. Any other key resets the hover.
    pub fn on_key(&mut self, key: EditorKey) -> KeyOutcome {
        let composing = self.is_composing();
        match key {
            EditorKey::Up | EditorKey::Down => {
                let mut direction = if key == EditorKey::Up {
                    Direction::Up
                } else {
                    Direction::Down
                };
                if self.settings.reverse() {
                    direction = direction.inverted();
                }
                self.on_navigate(direction);
                KeyOutcome {
                    handled: composing,
                    commit: None,
                }
            }
            EditorKey::Enter if composing => KeyOutcome {
                handled: true,
                commit: self.commit_hovered().ok(),
            },
            EditorKey::Enter | EditorKey::Other => {
                self.on_navigate(Direction::Stay);
                KeyOutcome::default()
            }
        }
    }

    /// Compute the commit of `option` without changing any state
    ///
    /// # Returns
    /// * `Result<Commit, CommitError>` - The replacement, or why there is none
    pub fn preview_commit(&self, option: &MentionOption) -> Result<Commit, CommitError> {
        let token = match (&self.state.in_progress, self.is_composing()) {
            (Some(token), true) => token,
            _ => return Err(CommitError::InvalidState),
        };
        if self.state.candidates.is_empty() {
            return Err(CommitError::NoSelection);
        }

        let replacement = format!("{}{} ", self.settings.symbol(), option.label());
        let replaced = token.span();

        let mut text =
            String::with_capacity(self.text.len() - replaced.len() + replacement.len());
        text.push_str(&self.text[..replaced.start]);
        text.push_str(&replacement);
        text.push_str(&self.text[replaced.end..]);

        Ok(Commit {
            text,
            cursor: replaced.start + replacement.len(),
            replaced,
            replacement,
        })
    }

    /// Replace the in-progress token with `option` and return to idle
    ///
    /// On error nothing changes.
    pub fn commit(&mut self, option: &MentionOption) -> Result<Commit, CommitError> {
        let commit = self.preview_commit(option)?;
        tracing::debug!(label = option.label(), cursor = commit.cursor, "committed mention");

        self.text.clone_from(&commit.text);
        self.go_idle(commit.cursor);
        self.notify();
        Ok(commit)
    }

    /// Commit the hovered candidate
    pub fn commit_hovered(&mut self) -> Result<Commit, CommitError> {
        if !self.is_composing() {
            return Err(CommitError::InvalidState);
        }
        let option = self.hovered().cloned().ok_or(CommitError::NoSelection)?;
        self.commit(&option)
    }

    /// Mentions currently present in the text, in left-to-right order
    pub fn collect(&self) -> Vec<MentionOption> {
        extract_mentions(&self.render())
    }

    /// Markup for the overlay of the current text
    pub fn render(&self) -> String {
        render(&self.text, self.settings.options(), self.settings.symbol())
    }

    fn go_idle(&mut self, cursor: usize) {
        if self.state.options_visible {
            tracing::debug!(cursor, "mention composition ended");
        }
        self.state = EngineState {
            cursor,
            ..EngineState::default()
        };
    }

    fn notify(&mut self) {
        if let Some(hook) = self.on_update.as_mut() {
            hook(&self.state);
        }
    }
}

impl fmt::Debug for MentionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MentionEngine")
            .field("settings", &self.settings)
            .field("text", &self.text)
            .field("state", &self.state)
            .field("on_update", &self.on_update.as_ref().map(|_| "<hook>"))
            .finish()
    }
}
