//! User repository - collection and lifecycle operations on admin users

use std::sync::Arc;

use serde_json::{json, Value as JsonValue};

use crate::adapters::api_client::member_path;
use crate::adapters::{ApiClient, HttpResponse};
use crate::domain::result::{Error, FieldErrors, Result};
use crate::domain::{Outcome, ResourceId, UserEntity};

/// Remote operations on Boruta admin users
///
/// Entities stay plain data; everything that talks to the admin API lives
/// here. A redirect raised by the API client is handed back as
/// `Outcome::Redirected` and never touches the entity involved.
pub struct UserRepository {
    client: Arc<ApiClient>,
}

impl UserRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// List all users
    pub async fn all(&self) -> Result<Outcome<Vec<UserEntity>>> {
        let outcome = self.client.get("/").await?;

        outcome.try_map(|response| {
            let records = unwrap_data(&response)?
                .as_array()
                .ok_or_else(|| Error::payload("expected `data` to be a list of users"))?;

            records.iter().map(UserEntity::from_payload).collect()
        })
    }

    /// Fetch a user by id
    pub async fn get(&self, id: &ResourceId) -> Result<Outcome<UserEntity>> {
        self.fetch(&member_path(id)?).await
    }

    /// Fetch the user the access token belongs to
    pub async fn current(&self) -> Result<Outcome<UserEntity>> {
        self.fetch("/current").await
    }

    async fn fetch(&self, path: &str) -> Result<Outcome<UserEntity>> {
        let outcome = self.client.get(path).await?;
        outcome.try_map(|response| UserEntity::from_payload(unwrap_data(&response)?))
    }

    /// Create or update a user.
    ///
    /// Validation runs first and nothing is sent when it fails. Users
    /// without an id are created (POST), others updated (PATCH). On success
    /// the server's representation is merged back into `user`; on a
    /// rejection its errors are stored in `user.errors` and returned.
    ///
    /// A response that cannot be merged yields `Error::Reconcile`: the write
    /// went through and must not be repeated blindly.
    ///
    /// Taking `&mut` keeps a single save in flight per entity.
    pub async fn save<'u>(&self, user: &'u mut UserEntity) -> Result<Outcome<&'u UserEntity>> {
        user.errors = None;
        user.validate()?;

        let body = json!({ "user": user.serialized() });
        let request = match &user.id {
            Some(id) => self.client.patch(&member_path(id)?, &body).await,
            None => self.client.post("/", &body).await,
        };

        let response = match request {
            Ok(Outcome::Completed(response)) => response,
            Ok(Outcome::Redirected(route)) => return Ok(Outcome::Redirected(route)),
            Err(err) => return Err(into_rejection(user, err)),
        };

        let merged = unwrap_data(&response).and_then(|data| user.merge(data));
        if let Err(source) = merged {
            tracing::warn!(user_id = ?user.id, error = %source, "Saved user could not be reconciled");
            return Err(Error::Reconcile {
                data: response.data,
                source: Box::new(source),
            });
        }
        tracing::info!(user_id = ?user.id, "User saved");

        Ok(Outcome::Completed(user))
    }

    /// Delete a user on the server. The local entity is left as is; callers
    /// drop it once the deletion went through.
    pub async fn destroy(&self, user: &UserEntity) -> Result<Outcome<HttpResponse>> {
        let id = user.id.as_ref().ok_or(Error::NotPersisted)?;

        let outcome = self.client.delete(&member_path(id)?).await?;
        if let Outcome::Completed(_) = &outcome {
            tracing::info!(user_id = %id, "User deleted");
        }
        Ok(outcome)
    }
}

/// The `data` member every successful admin API response is wrapped in
fn unwrap_data(response: &HttpResponse) -> Result<&JsonValue> {
    response
        .data
        .get("data")
        .ok_or_else(|| Error::payload("response has no `data` member"))
}

/// Turn an HTTP failure whose body carries an `errors` object into a server
/// rejection, mirrored into the entity. Other failures pass through unchanged.
fn into_rejection(user: &mut UserEntity, err: Error) -> Error {
    let errors = match &err {
        Error::Http { body, .. } => body.get("errors").and_then(FieldErrors::from_json),
        _ => None,
    };

    match errors {
        Some(errors) => {
            tracing::info!(user_id = ?user.id, %errors, "User rejected by server");
            user.errors = Some(errors.clone());
            Error::ServerRejection(errors)
        }
        None => err,
    }
}
