//! Output formatting for mentionsh
//!
//! This module provides the two output forms of a composed line:
//! - Overlay markup with every completed mention wrapped in a marker
//! - JSON (plain and pretty-printed) for the collected mentions

pub mod json;
pub mod markup;

pub use json::JsonFormatter;
pub use markup::{extract_mentions, render};
