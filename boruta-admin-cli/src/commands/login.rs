//! Login and logout commands - manage the stored access token

use anyhow::{Context, Result};
use boruta_admin_core::adapters::FileTokenStore;
use boruta_admin_core::{TokenStore, ACCESS_TOKEN_KEY};

use super::ensure_admin_dir;
use crate::output;

pub fn run_login(token: &str) -> Result<()> {
    let token = token.trim();
    if token.is_empty() {
        anyhow::bail!("Access token cannot be empty");
    }

    let store = FileTokenStore::open(&ensure_admin_dir()?).context("Failed to open token store")?;
    store
        .set(ACCESS_TOKEN_KEY, token)
        .context("Failed to store access token")?;

    output::success(&format!("Access token saved to {}", store.path().display()));
    Ok(())
}

pub fn run_logout() -> Result<()> {
    let store = FileTokenStore::open(&ensure_admin_dir()?).context("Failed to open token store")?;

    if store.access_token().is_none() {
        output::info("No access token stored");
        return Ok(());
    }

    store
        .remove(ACCESS_TOKEN_KEY)
        .context("Failed to remove access token")?;
    output::success("Access token removed");
    Ok(())
}
