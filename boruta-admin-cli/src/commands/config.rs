//! Config command - show or set the Boruta base URL

use anyhow::{Context, Result};
use boruta_admin_core::config::{Config, BASE_URL_ENV};
use boruta_admin_core::{adapters::FileTokenStore, TokenStore};
use colored::Colorize;

use super::ensure_admin_dir;
use crate::output;

pub fn run(base_url: Option<String>) -> Result<()> {
    let dir = ensure_admin_dir()?;

    if let Some(url) = base_url {
        let url = url.trim().trim_end_matches('/').to_string();
        let mut config = Config::load(&dir)?;
        config.base_url = Some(url.clone());
        // reject anything the API client could not use
        config.users_endpoint()?;
        config.save(&dir)?;

        output::success(&format!("Base URL set to {}", url));
        if std::env::var(BASE_URL_ENV).is_ok() {
            output::warning(&format!("{} is set and overrides this value", BASE_URL_ENV));
        }
        return Ok(());
    }

    let config = Config::load(&dir)?;
    let tokens = FileTokenStore::open(&dir).context("Failed to open token store")?;

    println!("{} {}", "Admin directory:".bold(), dir.display());
    match &config.base_url {
        Some(url) => println!("{} {}", "Base URL:".bold(), url),
        None => println!("{} {}", "Base URL:".bold(), "not configured".yellow()),
    }
    if let Ok(endpoint) = config.users_endpoint() {
        println!("{} {}", "Users endpoint:".bold(), endpoint);
    }
    let token_state = if tokens.access_token().is_some() {
        "stored".green()
    } else {
        "missing".yellow()
    };
    println!("{} {}", "Access token:".bold(), token_state);

    Ok(())
}
