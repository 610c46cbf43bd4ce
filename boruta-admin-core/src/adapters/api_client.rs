//! Boruta admin API client
//!
//! Authenticated HTTP client bound to the users endpoint of the admin API.
//! Every response goes through the same interceptor: successes pass through,
//! 404 and 400 are turned into navigation, anything else is an error.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method};
use serde_json::Value as JsonValue;
use url::Url;

use crate::domain::result::{Error, Result};
use crate::domain::{Outcome, ResourceId, Route};
use crate::ports::{Navigator, TokenStore};

/// Path of the users resource, relative to the Boruta base URL
pub const USERS_PATH: &str = "/api/users";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the users endpoint from a Boruta base URL
pub fn users_endpoint(base_url: &str) -> Result<String> {
    let parsed = Url::parse(base_url)
        .map_err(|e| Error::Config(format!("Invalid Boruta base URL '{}': {}", base_url, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "Boruta base URL must use http or https, got '{}'",
            parsed.scheme()
        )));
    }

    Ok(format!("{}{}", base_url.trim_end_matches('/'), USERS_PATH))
}

/// Path of a single user below the users endpoint: `/{id}`, with the id
/// percent-encoded as exactly one segment
pub fn member_path(id: &ResourceId) -> Result<String> {
    let segment = id.to_string();
    if matches!(segment.as_str(), "" | "." | "..") {
        return Err(Error::invalid_field(
            "id",
            format!("'{}' cannot be used as a user id", segment),
        ));
    }

    let mut url = Url::parse("http://localhost/")
        .map_err(|e| Error::Config(format!("Failed to build user path: {}", e)))?;
    url.path_segments_mut()
        .map_err(|_| Error::Config("Failed to build user path".to_string()))?
        .pop_if_empty()
        .push(&segment);

    Ok(url.path().to_string())
}

/// A response that made it through the interceptor
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// Parsed JSON body; `null` when the body is empty, a JSON string when
    /// the body is not JSON
    pub data: JsonValue,
}

/// Admin API client for the users resource
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    endpoint: String,
    navigator: Arc<dyn Navigator>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build a client for `{base_url}/api/users`.
    ///
    /// The access token is read from `tokens` here, once. A client keeps
    /// sending the same token; build a new one after the token changes.
    pub fn build(
        base_url: &str,
        tokens: &dyn TokenStore,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let endpoint = users_endpoint(base_url)?;

        let token = tokens.access_token().unwrap_or_default();
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| Error::Config(format!("Invalid access token: {}", e)))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            navigator,
        })
    }

    /// Users endpoint every path is resolved against
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn get(&self, path: &str) -> Result<Outcome<HttpResponse>> {
        self.send(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: &JsonValue) -> Result<Outcome<HttpResponse>> {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn patch(&self, path: &str, body: &JsonValue) -> Result<Outcome<HttpResponse>> {
        self.send(Method::PATCH, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Outcome<HttpResponse>> {
        self.send(Method::DELETE, path, None).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&JsonValue>,
    ) -> Result<Outcome<HttpResponse>> {
        let url = format!("{}{}", self.endpoint, path);
        tracing::debug!(%method, %url, "Admin API request");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::debug!(%url, error = %e, "Admin API request failed without response");
            Error::Transport(e)
        })?;

        self.intercept(response).await
    }

    /// Response interceptor shared by every request
    async fn intercept(&self, response: reqwest::Response) -> Result<Outcome<HttpResponse>> {
        let status = response.status();

        if status.is_success() {
            let data = read_body(response).await?;
            return Ok(Outcome::Completed(HttpResponse {
                status: status.as_u16(),
                data,
            }));
        }

        if let Some(route) = Route::for_status(status.as_u16()) {
            tracing::warn!(status = status.as_u16(), route = %route, "Redirecting on admin API response");
            self.navigator.navigate(route).await?;
            return Ok(Outcome::Redirected(route));
        }

        let body = read_body(response).await.unwrap_or(JsonValue::Null);
        tracing::debug!(status = status.as_u16(), "Admin API error response");
        Err(Error::Http {
            status: status.as_u16(),
            body,
        })
    }
}

async fn read_body(response: reqwest::Response) -> Result<JsonValue> {
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(JsonValue::Null);
    }
    Ok(serde_json::from_str(&text).unwrap_or(JsonValue::String(text)))
}
