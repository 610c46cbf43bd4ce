//! Opaque resource identifiers

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::result::{Error, Result};

/// Identifier of a remote resource.
///
/// The admin API is free to use numbers or strings (UUIDs in practice); the
/// wire form is kept as-is so it round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Text(String),
}

impl ResourceId {
    /// Read an optional id from a raw JSON value; `null` means absent
    pub fn from_json(field: &str, value: &JsonValue) -> Result<Option<Self>> {
        match value {
            JsonValue::Null => Ok(None),
            JsonValue::Number(n) => n
                .as_i64()
                .map(|n| Some(ResourceId::Number(n)))
                .ok_or_else(|| Error::invalid_field(field, format!("{} is not an integer id", n))),
            JsonValue::String(s) => Ok(Some(ResourceId::Text(s.clone()))),
            other => Err(Error::invalid_field(
                field,
                format!("expected number or string, got {}", other),
            )),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Number(n) => write!(f, "{}", n),
            ResourceId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(n: i64) -> Self {
        ResourceId::Number(n)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        ResourceId::Text(s.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        ResourceId::Text(s)
    }
}
