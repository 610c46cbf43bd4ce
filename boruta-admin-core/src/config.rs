//! Configuration management
//!
//! Settings live in `settings.json` inside the admin directory:
//! ```json
//! {
//!   "app": { "borutaBaseUrl": "https://boruta.example.com", ... }
//! }
//! ```
//! Keys this crate does not manage are preserved when saving.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::adapters::api_client::users_endpoint;

/// Environment variable overriding the configured Boruta base URL
pub const BASE_URL_ENV: &str = "BORUTA_BASE_URL";

/// Settings file name inside the admin directory
pub const SETTINGS_FILE: &str = "settings.json";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    boruta_base_url: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Admin client configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Boruta base URL, without the `/api/users` suffix
    pub base_url: Option<String>,
}

impl Config {
    /// Load config from the admin directory
    ///
    /// The base URL can be set via:
    /// 1. Settings file (`boruta-admin config --base-url ...`)
    /// 2. Environment variable BORUTA_BASE_URL, which wins when set
    pub fn load(dir: &Path) -> Result<Self> {
        let raw = read_settings(dir)?;
        let env_base_url = std::env::var(BASE_URL_ENV).ok().filter(|v| !v.trim().is_empty());

        Ok(Self::resolve(raw, env_base_url))
    }

    /// Load config from the settings file only, ignoring the environment
    pub fn load_settings(dir: &Path) -> Result<Self> {
        Ok(Self::resolve(read_settings(dir)?, None))
    }

    fn resolve(raw: SettingsFile, env_base_url: Option<String>) -> Self {
        Self {
            base_url: env_base_url.or(raw.app.boruta_base_url),
        }
    }

    /// Save config to the admin directory, keeping settings we don't manage
    pub fn save(&self, dir: &Path) -> Result<()> {
        let mut settings = read_settings(dir)?;
        settings.app.boruta_base_url = self.base_url.clone();

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(dir.join(SETTINGS_FILE), content)
            .with_context(|| format!("Failed to write {}", SETTINGS_FILE))?;
        Ok(())
    }

    /// Configured base URL, or an error explaining how to set one
    pub fn require_base_url(&self) -> Result<&str> {
        self.base_url.as_deref().with_context(|| {
            format!(
                "Boruta base URL is not configured. Set {} or run `boruta-admin config --base-url <url>`",
                BASE_URL_ENV
            )
        })
    }

    /// Full users endpoint, `{base_url}/api/users`
    pub fn users_endpoint(&self) -> Result<String> {
        Ok(users_endpoint(self.require_base_url()?)?)
    }
}

fn read_settings(dir: &Path) -> Result<SettingsFile> {
    let settings_path = dir.join(SETTINGS_FILE);
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }

    let content = std::fs::read_to_string(&settings_path)
        .with_context(|| format!("Failed to read {}", settings_path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid settings file {}", settings_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_settings_file_is_empty_config() {
        let dir = TempDir::new().unwrap();
        let raw = read_settings(dir.path()).unwrap();
        let config = Config::resolve(raw, None);
        assert!(config.base_url.is_none());
        assert!(config.require_base_url().is_err());
    }

    #[test]
    fn test_env_overrides_settings() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{ "app": { "borutaBaseUrl": "https://from-file.test" } }"#,
        )
        .unwrap();

        let raw = read_settings(dir.path()).unwrap();
        let config = Config::resolve(raw.clone(), Some("https://from-env.test".to_string()));
        assert_eq!(config.base_url.as_deref(), Some("https://from-env.test"));

        let config = Config::resolve(raw, None);
        assert_eq!(config.base_url.as_deref(), Some("https://from-file.test"));
    }

    #[test]
    fn test_save_preserves_unmanaged_settings() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{ "app": { "theme": "dark" }, "plugins": { "x": 1 } }"#,
        )
        .unwrap();

        let config = Config {
            base_url: Some("https://boruta.test".to_string()),
        };
        config.save(dir.path()).unwrap();

        let content = std::fs::read_to_string(dir.path().join(SETTINGS_FILE)).unwrap();
        let saved: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(saved["app"]["borutaBaseUrl"], "https://boruta.test");
        assert_eq!(saved["app"]["theme"], "dark");
        assert_eq!(saved["plugins"]["x"], 1);
    }

    #[test]
    fn test_users_endpoint() {
        let config = Config {
            base_url: Some("https://boruta.test/".to_string()),
        };
        assert_eq!(config.users_endpoint().unwrap(), "https://boruta.test/api/users");
    }

    #[test]
    fn test_invalid_settings_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "{ nope").unwrap();
        let err = read_settings(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid settings file"));
    }
}
