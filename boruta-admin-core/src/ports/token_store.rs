//! Token store port - client-side key-value string storage

use crate::domain::result::Result;

/// Key under which the admin access token is stored
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Key-value string store holding client credentials
///
/// Reads are synchronous: the API client consults the store once, when it is
/// built, and keeps the token for its whole lifetime.
pub trait TokenStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;

    /// The admin access token, if one is stored
    fn access_token(&self) -> Option<String> {
        self.get(ACCESS_TOKEN_KEY)
    }
}
