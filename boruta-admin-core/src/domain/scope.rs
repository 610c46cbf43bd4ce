//! Scope reference domain model
//!
//! Scopes are managed through their own admin resource; users only carry
//! references to them. This type covers what a user needs from a scope:
//! whether it exists server-side, its id, and its wire form.

use serde::Deserialize;
use serde_json::{json, Value as JsonValue};

use super::resource_id::ResourceId;
use super::result::{Error, Result};

/// A scope as seen from a user's authorized scope list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeRef {
    pub id: Option<ResourceId>,
    pub name: Option<String>,
    pub label: Option<String>,
    pub public: bool,
    /// True when the scope exists on the server
    pub persisted: bool,
}

/// Raw scope payload; keys the scope model does not know about are ignored
#[derive(Debug, Deserialize)]
struct RawScope {
    #[serde(default)]
    id: Option<ResourceId>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    public: Option<bool>,
    #[serde(default)]
    persisted: Option<bool>,
}

impl ScopeRef {
    /// Reference to an existing scope, known only by its id
    pub fn persisted(id: impl Into<ResourceId>) -> Self {
        Self {
            id: Some(id.into()),
            persisted: true,
            ..Default::default()
        }
    }

    /// Build a scope from its raw payload.
    ///
    /// An explicit `persisted` flag wins; otherwise a scope is persisted
    /// when it carries an id.
    pub fn from_payload(raw: &JsonValue) -> Result<Self> {
        let scope = RawScope::deserialize(raw)
            .map_err(|e| Error::invalid_field("authorized_scopes", e.to_string()))?;

        let persisted = scope.persisted.unwrap_or(scope.id.is_some());

        Ok(Self {
            id: scope.id,
            name: scope.name,
            label: scope.label,
            public: scope.public.unwrap_or(false),
            persisted,
        })
    }

    /// Wire form sent to the server
    pub fn serialized(&self) -> JsonValue {
        json!({
            "id": self.id,
            "name": self.name,
            "label": self.label,
            "public": self.public,
        })
    }
}
