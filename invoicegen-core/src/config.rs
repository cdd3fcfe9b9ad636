//! Configuration management
//!
//! Settings live in `settings.json` inside the application directory:
//! ```json
//! {
//!   "app": { "adminEmail": "admin@invoicegen.local", "storeName": "users", "tempPasswordLength": 8 }
//! }
//! ```
//! Keys the application does not manage are preserved on save.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::services::DEFAULT_TEMP_PASSWORD_LENGTH;

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@invoicegen.local";
pub const DEFAULT_STORE_NAME: &str = "users";

/// Environment override for the pre-provisioned admin email
pub const ADMIN_EMAIL_ENV: &str = "INVOICEGEN_ADMIN_EMAIL";

const SETTINGS_FILE: &str = "settings.json";

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
    admin_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    store_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    temp_password_length: Option<usize>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Email of the admin record created on first startup
    pub admin_email: String,
    /// Namespace the credential entries are stored under
    pub store_name: String,
    pub temp_password_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            store_name: DEFAULT_STORE_NAME.to_string(),
            temp_password_length: DEFAULT_TEMP_PASSWORD_LENGTH,
        }
    }
}

fn read_settings(settings_path: &Path) -> Result<SettingsFile> {
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(settings_path)
        .with_context(|| format!("Failed to read {}", settings_path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid settings file {}", settings_path.display()))
}

impl Config {
    /// Load config from the application directory
    ///
    /// The admin email can be overridden with `INVOICEGEN_ADMIN_EMAIL`.
    pub fn load(app_dir: &Path) -> Result<Self> {
        let raw = read_settings(&app_dir.join(SETTINGS_FILE))?;
        let defaults = Self::default();

        let admin_email = std::env::var(ADMIN_EMAIL_ENV)
            .ok()
            .filter(|email| !email.trim().is_empty())
            .or(raw.app.admin_email)
            .unwrap_or(defaults.admin_email);

        let temp_password_length = match raw.app.temp_password_length {
            Some(0) => anyhow::bail!("tempPasswordLength must be at least 1"),
            Some(len) => len,
            None => defaults.temp_password_length,
        };

        Ok(Self {
            admin_email,
            store_name: raw.app.store_name.unwrap_or(defaults.store_name),
            temp_password_length,
        })
    }

    /// Save config, preserving settings this crate does not manage
    pub fn save(&self, app_dir: &Path) -> Result<()> {
        let settings_path = app_dir.join(SETTINGS_FILE);
        let mut settings = read_settings(&settings_path).unwrap_or_default();

        settings.app.admin_email = Some(self.admin_email.clone());
        settings.app.store_name = Some(self.store_name.clone());
        settings.app.temp_password_length = Some(self.temp_password_length);

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_settings_file() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.store_name, "users");
        assert_eq!(config.temp_password_length, 8);
    }

    #[test]
    fn test_save_preserves_unknown_keys() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"app": {"theme": "green", "storeName": "team"}, "company": "COCCINELLE SARL"}"#,
        )
        .unwrap();

        let mut config = Config::load(dir.path()).unwrap();
        assert_eq!(config.store_name, "team");

        config.temp_password_length = 10;
        config.save(dir.path()).unwrap();

        let raw: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("settings.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(raw["company"], "COCCINELLE SARL");
        assert_eq!(raw["app"]["theme"], "green");
        assert_eq!(raw["app"]["tempPasswordLength"], 10);
    }

    #[test]
    fn test_zero_length_password_rejected() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"app": {"tempPasswordLength": 0}}"#,
        )
        .unwrap();
        assert!(Config::load(dir.path()).is_err());
    }
}
