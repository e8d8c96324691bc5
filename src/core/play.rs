//! Play records as served by the playbook API.
//!
//! The API body is `{ category?: string, plays: [{ description, context? }] }`.
//! Only object-field access is performed on it: a missing or non-array
//! `plays` field reads as an empty list, and empty strings read as absent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One step of a playbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    /// Human-readable description, used as the block label.
    pub description: String,
    /// Optional context, used as the block tooltip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Play {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Read a play out of an arbitrary JSON element.
    ///
    /// Non-string descriptions become an empty label; non-string or empty
    /// contexts become `None`.
    fn from_value(value: &Value) -> Self {
        let description = value
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Self {
            description,
            context: non_empty_str(value.get("context")),
        }
    }
}

/// The decoded body of a playbook dump.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub plays: Vec<Play>,
    /// Set when the body carried no usable `plays` array.
    #[serde(skip)]
    pub plays_defaulted: bool,
}

impl PlayList {
    pub fn new(category: Option<String>, plays: Vec<Play>) -> Self {
        Self {
            category,
            plays,
            plays_defaulted: false,
        }
    }

    /// Decode a response body.
    ///
    /// Fails only when the body is not JSON at all.
    pub fn from_json_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(body)?;
        Ok(Self::from_value(&value))
    }

    pub fn from_value(value: &Value) -> Self {
        let category = non_empty_str(value.get("category"));

        match value.get("plays").and_then(Value::as_array) {
            Some(items) => Self {
                category,
                plays: items.iter().map(Play::from_value).collect(),
                plays_defaulted: false,
            },
            None => Self {
                category,
                plays: Vec::new(),
                plays_defaulted: true,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
