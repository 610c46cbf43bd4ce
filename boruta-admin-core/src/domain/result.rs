//! Result and error types for the core library

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Structured errors keyed by field, as produced by local validation and by
/// the admin API on rejected writes.
///
/// Local validation always yields `{ field: [messages] }`. Server values are
/// kept as sent, so nested association errors such as
/// `{ "authorized_scopes": [{ "id": ["is invalid"] }] }` survive unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, JsonValue>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors holding a single message for a single field
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Errors from the `errors` member of a response body; any JSON object qualifies
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        value
            .as_object()
            .map(|fields| Self(fields.iter().map(|(k, v)| (k.clone(), v.clone())).collect()))
    }

    /// Append a message to a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let entry = self
            .0
            .entry(field.into())
            .or_insert_with(|| JsonValue::Array(Vec::new()));
        if !entry.is_array() {
            let previous = entry.take();
            *entry = JsonValue::Array(vec![previous]);
        }
        if let JsonValue::Array(messages) = entry {
            messages.push(JsonValue::String(message.into()));
        }
    }

    /// Raw value recorded for a field
    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.0.get(field)
    }

    /// Messages recorded for a field, nested errors flattened to `key: message`
    pub fn messages(&self, field: &str) -> Vec<String> {
        self.0.get(field).map(flatten_messages).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn flatten_messages(value: &JsonValue) -> Vec<String> {
    match value {
        JsonValue::Null => Vec::new(),
        JsonValue::String(message) => vec![message.clone()],
        JsonValue::Array(items) => items.iter().flat_map(flatten_messages).collect(),
        JsonValue::Object(fields) => fields
            .iter()
            .flat_map(|(key, value)| {
                flatten_messages(value)
                    .into_iter()
                    .map(move |message| format!("{}: {}", key, message))
            })
            .collect(),
        other => vec![other.to_string()],
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, _) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, self.messages(field).join(", "))?;
        }
        Ok(())
    }
}

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    /// Local validation failed; nothing was sent to the server
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// The server refused a write and described why
    #[error("Rejected by server: {0}")]
    ServerRejection(FieldErrors),

    /// Non-success response that the interceptor did not redirect
    #[error("Admin API error: HTTP {status}")]
    Http { status: u16, body: JsonValue },

    /// No response at all (connection refused, timeout, ...)
    #[error("Admin API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unknown user field `{0}`")]
    UnknownField(String),

    #[error("Invalid value for `{field}`: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Unexpected response payload: {0}")]
    Payload(String),

    /// The write reached the server, but its response could not be applied
    /// to the local entity. `data` is the response body as received.
    #[error("User was saved, but the server response could not be applied: {source}")]
    Reconcile {
        data: JsonValue,
        #[source]
        source: Box<Error>,
    },

    #[error("User has no id and was never persisted")]
    NotPersisted,

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid field error
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a payload shape error
    pub fn payload(msg: impl Into<String>) -> Self {
        Self::Payload(msg.into())
    }

    /// Structured field errors carried by this error, if any
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) | Self::ServerRejection(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
