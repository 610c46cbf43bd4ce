//! Outcome of a remote operation and the navigation routes it may trigger

use std::fmt;

use serde::{Deserialize, Serialize};

use super::result::Result;

/// Navigation target raised by the API client on specific HTTP statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    NotFound,
    BadRequest,
}

impl Route {
    /// Route name as understood by the navigation subsystem
    pub fn name(&self) -> &'static str {
        match self {
            Route::NotFound => "not-found",
            Route::BadRequest => "bad-request",
        }
    }

    /// Route the interceptor redirects to for a response status, if any
    pub fn for_status(status: u16) -> Option<Self> {
        match status {
            404 => Some(Route::NotFound),
            400 => Some(Route::BadRequest),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Either the value an operation produced, or the route it redirected to.
///
/// A redirect is neither a success nor a failure: the original response was
/// consumed by navigation and there is no value to hand back.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Completed(T),
    Redirected(Route),
}

impl<T> Outcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Completed(value) => Outcome::Completed(f(value)),
            Outcome::Redirected(route) => Outcome::Redirected(route),
        }
    }

    /// Map the completed value through a fallible function
    pub fn try_map<U>(self, f: impl FnOnce(T) -> Result<U>) -> Result<Outcome<U>> {
        match self {
            Outcome::Completed(value) => f(value).map(Outcome::Completed),
            Outcome::Redirected(route) => Ok(Outcome::Redirected(route)),
        }
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(value) => Some(value),
            Outcome::Redirected(_) => None,
        }
    }

    pub fn redirect(&self) -> Option<Route> {
        match self {
            Outcome::Completed(_) => None,
            Outcome::Redirected(route) => Some(*route),
        }
    }

    pub fn is_redirected(&self) -> bool {
        matches!(self, Outcome::Redirected(_))
    }
}
