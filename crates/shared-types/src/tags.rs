//! # Tag Values
//!
//! Client-supplied metadata attached to assets and annotations. Tags are
//! JSON-shaped: strings, finite numbers, booleans, arrays, and maps,
//! recursively. The structure is validated once at the boundary so the
//! rest of the system can treat tags as opaque.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// A full tag set. Replacement is last-write-wins on the whole map.
pub type Tags = BTreeMap<String, TagValue>;

/// Maximum nesting depth accepted at the boundary.
pub const MAX_TAG_DEPTH: usize = 32;

/// A recursive, JSON-shaped tag value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<TagValue>),
    Object(BTreeMap<String, TagValue>),
}

impl TagValue {
    /// Validate the JSON-like structure of this value.
    ///
    /// Rejects non-finite numbers (no JSON representation), empty map
    /// keys, and nesting beyond [`MAX_TAG_DEPTH`].
    pub fn validate(&self) -> Result<(), TagError> {
        self.validate_at(0)
    }

    fn validate_at(&self, depth: usize) -> Result<(), TagError> {
        if depth > MAX_TAG_DEPTH {
            return Err(TagError::TooDeep { max: MAX_TAG_DEPTH });
        }
        match self {
            TagValue::Number(n) if !n.is_finite() => Err(TagError::NonFiniteNumber(*n)),
            TagValue::Array(items) => {
                for item in items {
                    item.validate_at(depth + 1)?;
                }
                Ok(())
            }
            TagValue::Object(map) => {
                for (key, value) in map {
                    if key.is_empty() {
                        return Err(TagError::EmptyKey);
                    }
                    value.validate_at(depth + 1)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl From<&str> for TagValue {
    fn from(s: &str) -> Self {
        TagValue::String(s.to_string())
    }
}

impl From<serde_json::Value> for TagValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => TagValue::Null,
            serde_json::Value::Bool(b) => TagValue::Bool(b),
            serde_json::Value::Number(n) => TagValue::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => TagValue::String(s),
            serde_json::Value::Array(items) => {
                TagValue::Array(items.into_iter().map(TagValue::from).collect())
            }
            serde_json::Value::Object(map) => TagValue::Object(
                map.into_iter().map(|(k, v)| (k, TagValue::from(v))).collect(),
            ),
        }
    }
}

/// Validate a whole tag set at the boundary.
pub fn validate_tags(tags: &Tags) -> Result<(), TagError> {
    for (key, value) in tags {
        if key.is_empty() {
            return Err(TagError::EmptyKey);
        }
        value.validate()?;
    }
    Ok(())
}

/// Tag structure violations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TagError {
    #[error("tag number {0} has no JSON representation")]
    NonFiniteNumber(f64),
    #[error("tag map keys must be non-empty")]
    EmptyKey,
    #[error("tag nesting exceeds {max} levels")]
    TooDeep { max: usize },
}
