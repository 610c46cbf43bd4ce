//! User domain model
//!
//! A `UserEntity` is built from raw admin API payloads through a fixed set of
//! per-field transforms. The same merge routine is used on construction and to
//! fold the server's response back into the entity after a save.

use serde_json::{json, Map, Value as JsonValue};

use super::resource_id::ResourceId;
use super::result::{Error, FieldErrors, Result};
use super::scope::ScopeRef;

const AUTHORIZED_SCOPES: &str = "authorized_scopes";

/// Wrapper around an authorized scope, mirroring the `{ model: scope }`
/// shape used by the admin interface's scope pickers
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorizedScope {
    pub model: ScopeRef,
}

impl From<ScopeRef> for AuthorizedScope {
    fn from(model: ScopeRef) -> Self {
        Self { model }
    }
}

/// A Boruta admin user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserEntity {
    /// Absent until the server has created the user
    pub id: Option<ResourceId>,
    /// Display only, never sent back
    pub email: Option<String>,
    pub authorized_scopes: Vec<AuthorizedScope>,
    /// Display flag for the scope editor, never sent back
    pub authorize_scopes: bool,
    /// Errors of the last failed validate/save attempt
    pub errors: Option<FieldErrors>,
}

/// Fields a user payload may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    Id,
    Email,
    AuthorizedScopes,
}

/// Result of a field transform, applied by `UserEntity::merge`
#[derive(Debug, Clone, PartialEq)]
enum FieldValue {
    Id(Option<ResourceId>),
    Email(Option<String>),
    AuthorizedScopes(Vec<AuthorizedScope>),
}

impl UserField {
    pub const ALL: [UserField; 3] = [UserField::Id, UserField::Email, UserField::AuthorizedScopes];

    /// Wire name of the field
    pub fn name(self) -> &'static str {
        match self {
            UserField::Id => "id",
            UserField::Email => "email",
            UserField::AuthorizedScopes => AUTHORIZED_SCOPES,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    fn transform(self, raw: &JsonValue) -> Result<FieldValue> {
        match self {
            UserField::Id => ResourceId::from_json(self.name(), raw).map(FieldValue::Id),
            UserField::Email => match raw {
                JsonValue::Null => Ok(FieldValue::Email(None)),
                JsonValue::String(email) => Ok(FieldValue::Email(Some(email.clone()))),
                other => Err(Error::invalid_field(
                    self.name(),
                    format!("expected a string, got {}", other),
                )),
            },
            UserField::AuthorizedScopes => {
                let scopes = raw.as_array().ok_or_else(|| {
                    Error::invalid_field(self.name(), format!("expected an array, got {}", raw))
                })?;
                scopes
                    .iter()
                    .map(|scope| ScopeRef::from_payload(scope).map(AuthorizedScope::from))
                    .collect::<Result<Vec<_>>>()
                    .map(FieldValue::AuthorizedScopes)
            }
        }
    }
}

impl UserEntity {
    /// An empty, not yet persisted user
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a user from a raw payload; fields the payload omits keep their defaults
    pub fn from_payload(payload: &JsonValue) -> Result<Self> {
        let mut user = Self::new();
        user.merge(payload)?;
        Ok(user)
    }

    /// Assign every field named in `payload`, leaving the others untouched.
    ///
    /// Unknown field names are rejected. All transforms run before the first
    /// assignment, so a rejected payload leaves the entity unchanged.
    pub fn merge(&mut self, payload: &JsonValue) -> Result<()> {
        let fields = payload
            .as_object()
            .ok_or_else(|| Error::payload(format!("expected a user object, got {}", payload)))?;

        let values = Self::transform_all(fields)?;
        for value in values {
            match value {
                FieldValue::Id(id) => self.id = id,
                FieldValue::Email(email) => self.email = email,
                FieldValue::AuthorizedScopes(scopes) => self.authorized_scopes = scopes,
            }
        }
        Ok(())
    }

    fn transform_all(fields: &Map<String, JsonValue>) -> Result<Vec<FieldValue>> {
        fields
            .iter()
            .map(|(name, raw)| {
                UserField::from_name(name)
                    .ok_or_else(|| Error::UnknownField(name.clone()))
                    .and_then(|field| field.transform(raw))
            })
            .collect()
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Append a scope to the authorized list
    pub fn authorize(&mut self, scope: ScopeRef) {
        self.authorized_scopes.push(AuthorizedScope::from(scope));
    }

    /// Check the authorized scopes before submission.
    ///
    /// Only the first offending scope, in list order, is reported. The
    /// outcome is mirrored into `errors`.
    pub fn validate(&mut self) -> Result<()> {
        match self.scope_violation() {
            Some(errors) => {
                tracing::debug!(user_id = ?self.id, %errors, "User failed validation");
                self.errors = Some(errors.clone());
                Err(Error::Validation(errors))
            }
            None => {
                self.errors = None;
                Ok(())
            }
        }
    }

    fn scope_violation(&self) -> Option<FieldErrors> {
        for AuthorizedScope { model: scope } in &self.authorized_scopes {
            if !scope.persisted {
                return Some(FieldErrors::single(AUTHORIZED_SCOPES, "cannot be empty"));
            }

            let occurrences = self
                .authorized_scopes
                .iter()
                .filter(|other| other.model.id == scope.id)
                .count();
            if occurrences > 1 {
                return Some(FieldErrors::single(AUTHORIZED_SCOPES, "must be unique"));
            }
        }
        None
    }

    /// Wire form sent on create/update. `email` and display state stay local;
    /// an absent id is left out entirely.
    pub fn serialized(&self) -> JsonValue {
        let scopes: Vec<JsonValue> = self
            .authorized_scopes
            .iter()
            .map(|scope| scope.model.serialized())
            .collect();

        let mut body = json!({ "authorized_scopes": scopes });
        if let Some(id) = &self.id {
            body["id"] = json!(id);
        }
        body
    }
}
