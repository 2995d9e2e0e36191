//! # JSON Runtime Types
//!
//! Classifies a `serde_json::Value` into the type vocabulary used by JSON
//! Schema and Swagger `type` keywords. A numeric value with no fractional
//! part is `integer`, any other number is `number`. Arrays are `array`
//! regardless of what they contain.
//!
//! `integer` and `number` are distinct: a declared `number` is only met by a
//! value with a fractional part.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Runtime type of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl JsonType {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    Self::Integer
                } else {
                    match n.as_f64() {
                        Some(f) if f.is_finite() && f.fract() == 0.0 => Self::Integer,
                        _ => Self::Number,
                    }
                }
            }
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// The keyword spelling of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Whether this runtime type is exactly the declared `type` keyword.
    pub fn matches(&self, expected: &str) -> bool {
        self.as_str() == expected
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
