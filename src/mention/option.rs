//! Mention options
//!
//! An option is an opaque candidate value supplied by the host. It is either a
//! plain label (`"alice"`) or a structured record with at least a `name` field
//! (`{"name": "alice", "id": 7}`). Extra record fields are carried untouched so
//! the serialized payload attached to a rendered mention round-trips losslessly.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A candidate value that can be mentioned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MentionOption {
    /// Plain label, used as-is
    Label(String),

    /// Structured record keyed by its `name`
    Record {
        /// Canonical label of the record
        name: String,

        /// Any other fields supplied by the host
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
}

impl MentionOption {
    /// Create a record option with no extra fields
    pub fn record(name: impl Into<String>) -> Self {
        MentionOption::Record {
            name: name.into(),
            extra: Map::new(),
        }
    }

    /// Add an extra field to a record option
    ///
    /// A plain label is promoted to a record whose `name` is the label.
    pub fn with_field(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let (name, mut extra) = match self {
            MentionOption::Label(name) => (name, Map::new()),
            MentionOption::Record { name, extra } => (name, extra),
        };
        extra.insert(key.into(), value.into());
        MentionOption::Record { name, extra }
    }

    /// The canonical label: the `name` field, or the label itself
    pub fn label(&self) -> &str {
        match self {
            MentionOption::Label(label) => label,
            MentionOption::Record { name, .. } => name,
        }
    }

    /// Look up an extra field of a record option
    pub fn field(&self, key: &str) -> Option<&Value> {
        match self {
            MentionOption::Label(_) => None,
            MentionOption::Record { extra, .. } => extra.get(key),
        }
    }

    /// Serialize the option into the payload carried by a mention marker
    ///
    /// # Returns
    /// * `serde_json::Result<String>` - Compact JSON encoding of the option
    pub fn to_payload(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize an option from a mention marker payload
    pub fn from_payload(payload: &str) -> serde_json::Result<Self> {
        serde_json::from_str(payload)
    }
}

impl From<&str> for MentionOption {
    fn from(label: &str) -> Self {
        MentionOption::Label(label.to_string())
    }
}

impl From<String> for MentionOption {
    fn from(label: String) -> Self {
        MentionOption::Label(label)
    }
}

/// Default display template: the canonical label
pub fn default_template(option: &MentionOption) -> String {
    option.label().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_label_of_plain_option() {
        let option = MentionOption::from("alice");
        assert_eq!(option.label(), "alice");
        assert!(option.field("id").is_none());
    }

    #[test]
    fn test_label_of_record_option() {
        let option = MentionOption::record("bob").with_field("id", 2);
        assert_eq!(option.label(), "bob");
        assert_eq!(option.field("id"), Some(&json!(2)));
    }

    #[test]
    fn test_deserialize_untagged() {
        let options: Vec<MentionOption> =
            serde_json::from_value(json!(["alice", {"name": "bob", "team": "core"}])).unwrap();
        assert_eq!(options[0], MentionOption::from("alice"));
        assert_eq!(options[1].label(), "bob");
        assert_eq!(options[1].field("team"), Some(&json!("core")));
    }

    #[test]
    fn test_record_without_name_is_rejected() {
        let result: serde_json::Result<MentionOption> =
            serde_json::from_value(json!({"id": 1}));
        assert!(result.is_err());
    }

    #[test]
    fn test_payload_keeps_extra_fields() {
        let option = MentionOption::record("carol")
            .with_field("id", 3)
            .with_field("roles", json!(["admin", "ops"]));
        let payload = option.to_payload().unwrap();
        assert_eq!(MentionOption::from_payload(&payload).unwrap(), option);
    }

    #[test]
    fn test_with_field_promotes_label() {
        let option = MentionOption::from("dave").with_field("id", 4);
        assert!(matches!(option, MentionOption::Record { .. }));
        assert_eq!(option.label(), "dave");
    }

    #[test]
    fn test_default_template() {
        assert_eq!(default_template(&MentionOption::record("erin")), "erin");
    }
}
