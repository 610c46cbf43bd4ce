//! CLI command implementations

pub mod config;
pub mod login;
pub mod users;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use boruta_admin_core::adapters::LogNavigator;
use boruta_admin_core::{AdminContext, Outcome, ResourceId};

use crate::output;

/// Get the admin directory from environment or default
pub fn get_admin_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("BORUTA_ADMIN_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".boruta-admin"))
        .context("Could not find home directory; set BORUTA_ADMIN_DIR")
}

/// Get the admin directory, creating it if needed
pub fn ensure_admin_dir() -> Result<PathBuf> {
    let dir = get_admin_dir()?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create admin directory: {:?}", dir))?;
    Ok(dir)
}

/// Get the admin context
pub fn get_context() -> Result<AdminContext> {
    let dir = ensure_admin_dir()?;
    tracing::debug!(dir = %dir.display(), "Using admin directory");
    AdminContext::new(&dir, Arc::new(LogNavigator)).context("Failed to initialize admin context")
}

/// Unwrap a completed outcome, reporting a redirect as a failure
pub fn completed<T>(outcome: Outcome<T>) -> Result<T> {
    match outcome {
        Outcome::Completed(value) => Ok(value),
        Outcome::Redirected(route) => {
            output::warning(&format!("Admin API redirected to '{}'", route));
            anyhow::bail!("Request was not completed ({})", route)
        }
    }
}

/// Ids typed on the command line: integers stay numeric, anything else is text
pub fn parse_id(raw: &str) -> ResourceId {
    raw.parse::<i64>()
        .map(ResourceId::from)
        .unwrap_or_else(|_| ResourceId::from(raw))
}
