//! JSON formatting for collected mentions
//!
//! This module provides JSON output for the options extracted from a line:
//! - Pretty-printed and compact JSON output
//! - Optional color highlighting for pretty output

use colored_json::prelude::*;

use crate::error::{MentionshError, Result};
use crate::mention::MentionOption;

/// JSON formatter with pretty printing support
pub struct JsonFormatter {
    /// Enable pretty printing
    pretty: bool,

    /// Indentation level
    indent: usize,

    /// Enable colored output
    use_colors: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    ///
    /// # Arguments
    /// * `pretty` - Enable pretty printing
    /// * `use_colors` - Enable colored output
    /// * `indent` - Spaces per indentation level
    ///
    /// # Returns
    /// * `Self` - New formatter
    pub fn new(pretty: bool, use_colors: bool, indent: usize) -> Self {
        Self {
            pretty,
            indent,
            use_colors,
        }
    }

    /// Format mentions as a JSON array
    ///
    /// # Arguments
    /// * `mentions` - Options extracted from the text
    ///
    /// # Returns
    /// * `Result<String>` - JSON array string
    pub fn format_mentions(&self, mentions: &[MentionOption]) -> Result<String> {
        let json_str = if self.pretty {
            self.to_pretty_string(&mentions)?
        } else {
            serde_json::to_string(mentions)?
        };

        // Compact JSON stays plain for piping
        if self.use_colors && self.pretty {
            Ok(json_str.to_colored_json_auto().unwrap_or(json_str))
        } else {
            Ok(json_str)
        }
    }

    /// Convert a value to pretty-printed JSON with custom indentation
    fn to_pretty_string<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        let mut buf = Vec::new();
        let indent = " ".repeat(self.indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(|e| MentionshError::Generic(e.to_string()))
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(true, false, 2)
    }
}
