//! Boruta Admin Core - client-side user model for the Boruta admin API
//!
//! This crate follows hexagonal architecture:
//!
//! - **domain**: Users, scope references, errors and operation outcomes
//! - **ports**: Trait definitions for external collaborators (TokenStore, Navigator)
//! - **services**: Remote operations on users (UserRepository)
//! - **adapters**: Concrete implementations (reqwest API client, token stores, navigators)

pub mod domain;
pub mod ports;
pub mod services;
pub mod adapters;
pub mod config;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use adapters::{ApiClient, FileTokenStore};
use config::Config;
use ports::Navigator;
use services::UserRepository;

// Re-export commonly used types at crate root
pub use domain::{
    AuthorizedScope, FieldErrors, Outcome, ResourceId, Route, ScopeRef, UserEntity, UserField,
};
pub use domain::result::Error;
pub use ports::{TokenStore, ACCESS_TOKEN_KEY};

/// Main context for admin operations
///
/// Holds the configuration, the token store and a user repository bound to
/// a client built from both.
pub struct AdminContext {
    pub config: Config,
    pub tokens: Arc<FileTokenStore>,
    pub users: UserRepository,
}

impl AdminContext {
    /// Create a new admin context from the files in `dir`
    pub fn new(dir: &Path, navigator: Arc<dyn Navigator>) -> Result<Self> {
        let config = Config::load(dir)?;
        let tokens = Arc::new(
            FileTokenStore::open(dir).context("Failed to open token store")?,
        );

        let client = ApiClient::build(config.require_base_url()?, tokens.as_ref(), navigator)
            .context("Failed to build admin API client")?;
        let users = UserRepository::new(Arc::new(client));

        Ok(Self {
            config,
            tokens,
            users,
        })
    }
}
