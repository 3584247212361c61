use serde::{Deserialize, Serialize};
use std::fmt;

/// A criterion value as it was stored when the entity was last synchronized.
///
/// Ledgers store these loosely typed, so integers, floats, strings and even
/// `null` show up where a boolean was meant. Any JSON value decodes; shapes
/// that carry no boolean land in `Other` and read as uninterpretable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordedValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

// Decoded JSON numbers are never NaN.
impl Eq for RecordedValue {}

impl RecordedValue {
    /// Interprets the value as a boolean state.
    ///
    /// `1`/`0`, `1.0`/`0.0`, `"1"`/`"0"`, `"true"`/`"false"` and `"yes"`/`"no"` are
    /// accepted. Anything else yields `None`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RecordedValue::Bool(b) => Some(*b),
            RecordedValue::Int(1) => Some(true),
            RecordedValue::Int(0) => Some(false),
            RecordedValue::Int(_) => None,
            RecordedValue::Float(f) if *f == 1.0 => Some(true),
            RecordedValue::Float(f) if *f == 0.0 => Some(false),
            RecordedValue::Float(_) => None,
            RecordedValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => Some(true),
                "0" | "false" | "no" => Some(false),
                _ => None,
            },
            RecordedValue::Other(_) => None,
        }
    }

    /// Returns true if the recorded value differs from a computed state.
    /// Values that are not interpretable as booleans always differ.
    #[must_use]
    pub fn differs_from(&self, current: bool) -> bool {
        self.as_bool() != Some(current)
    }
}

impl From<bool> for RecordedValue {
    fn from(b: bool) -> Self {
        RecordedValue::Bool(b)
    }
}

impl From<i64> for RecordedValue {
    fn from(i: i64) -> Self {
        RecordedValue::Int(i)
    }
}

impl From<&str> for RecordedValue {
    fn from(s: &str) -> Self {
        RecordedValue::Text(s.to_string())
    }
}

impl fmt::Display for RecordedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordedValue::Bool(b) => write!(f, "{b}"),
            RecordedValue::Int(i) => write!(f, "{i}"),
            RecordedValue::Float(x) => write!(f, "{x}"),
            RecordedValue::Text(s) => f.write_str(s),
            RecordedValue::Other(v) => write!(f, "{v}"),
        }
    }
}
