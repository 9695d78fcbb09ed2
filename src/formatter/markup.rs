//! Overlay markup for completed mentions
//!
//! `render` wraps every completed mention of a text in a `<u>` marker carrying
//! the serialized option, and `extract_mentions` reads those payloads back out
//! of previously rendered markup. Text outside the markers is passed through
//! verbatim.

use crate::mention::option::MentionOption;
use crate::mention::token_stream::find_all_tokens;

/// Tag name of a mention marker
pub const MARKER_TAG: &str = "u";

/// Attribute holding the serialized option
pub const MARKER_ATTRIBUTE: &str = "mentiondata";

/// Appended when the text does not end with a space
pub const TRAILING_SPACE: &str = "&nbsp;";

/// Render text with every completed mention wrapped in a marker
///
/// A completed mention is a token whose text, with the trigger symbol removed,
/// equals the canonical label of an option exactly. The first such option wins.
///
/// # Arguments
/// * `text` - Raw text from the input surface
/// * `options` - All options
/// * `symbol` - Trigger symbol
///
/// # Returns
/// * `String` - Markup for the overlay
pub fn render(text: &str, options: &[MentionOption], symbol: char) -> String {
    let mut out = String::with_capacity(text.len() + TRAILING_SPACE.len());
    let mut copied = 0;

    for token in find_all_tokens(text, symbol) {
        let label = token.stripped(symbol);
        let Some(option) = options.iter().find(|option| option.label() == label) else {
            continue;
        };

        let payload = match option.to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(%err, label, "failed to serialize mention payload");
                continue;
            }
        };

        out.push_str(&text[copied..token.start]);
        out.push_str(&format!(
            "<{MARKER_TAG} {MARKER_ATTRIBUTE}=\"{}\">{}</{MARKER_TAG}>",
            escape_attribute(&payload),
            token.text
        ));
        copied = token.end();
    }

    out.push_str(&text[copied..]);
    if !text.ends_with(' ') {
        out.push_str(TRAILING_SPACE);
    }
    out
}

/// Extract the options of every mention marker, in document order
///
/// Markers whose payload cannot be deserialized are skipped.
pub fn extract_mentions(markup: &str) -> Vec<MentionOption> {
    MarkerScanner::new(markup)
        .filter_map(|payload| {
            match MentionOption::from_payload(&unescape_attribute(payload)) {
                Ok(option) => Some(option),
                Err(err) => {
                    tracing::warn!(%err, payload, "skipping malformed mention payload");
                    None
                }
            }
        })
        .collect()
}

/// Escape a value for use inside a double-quoted attribute
pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Reverse [`escape_attribute`]; unknown entities are kept as-is
pub fn unescape_attribute(value: &str) -> String {
    const ENTITIES: &[(&str, char)] = &[
        ("&quot;", '"'),
        ("&#34;", '"'),
        ("&#39;", '\''),
        ("&#x27;", '\''),
        ("&apos;", '\''),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&amp;", '&'),
    ];

    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
            Some((entity, ch)) => {
                out.push(*ch);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Iterator over the raw (still escaped) payloads of mention markers
///
/// Only the exact opener written by [`render`] is recognized:
/// `<u mentiondata="PAYLOAD">`. The payload is attribute-escaped, so it never
/// contains a raw `"`.
struct MarkerScanner<'a> {
    markup: &'a str,
    opener: String,
    pos: usize,
}

impl<'a> MarkerScanner<'a> {
    fn new(markup: &'a str) -> Self {
        Self {
            markup,
            opener: format!("<{MARKER_TAG} {MARKER_ATTRIBUTE}=\""),
            pos: 0,
        }
    }
}

impl<'a> Iterator for MarkerScanner<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            let open = self.pos + self.markup[self.pos..].find(&self.opener)?;
            let value_start = open + self.opener.len();
            let value_end = value_start + self.markup[value_start..].find('"')?;
            self.pos = value_end + 1;

            if self.markup[self.pos..].starts_with('>') {
                return Some(&self.markup[value_start..value_end]);
            }
        }
    }
}
