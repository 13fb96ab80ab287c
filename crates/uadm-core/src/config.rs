//! Configuration management for uadm.
//!
//! Loads configuration from ${UADM_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::DEFAULT_ADMIN_LOGIN_PATH;

/// Environment variable that overrides `api_base_url`.
pub const API_URL_ENV: &str = "UADM_API_URL";

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8001";
const DEFAULT_LOG_LEVEL: &str = "info";

fn default_config_template() -> &'static str {
    include_str!("default_config.toml")
}

/// Path helpers.
///
/// Resolution order for the home directory:
/// 1. UADM_HOME env var
/// 2. ~/.config/uadm (default)
pub mod paths {
    use std::path::PathBuf;

    use anyhow::{Context, Result};

    /// Returns the uadm home directory.
    pub fn uadm_home() -> Result<PathBuf> {
        if let Ok(home) = std::env::var("UADM_HOME") {
            return Ok(PathBuf::from(home));
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("uadm"))
            .context("Could not determine home directory; set UADM_HOME")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> Result<PathBuf> {
        Ok(uadm_home()?.join("config.toml"))
    }

    /// Directory for the interactive session's log file.
    pub fn logs_dir() -> Result<PathBuf> {
        Ok(uadm_home()?.join("logs"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the backend, without a trailing slash.
    pub api_base_url: String,
    /// Path of the admin credential exchange endpoint.
    pub admin_login_path: String,
    /// Default log filter when UADM_LOG is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            admin_login_path: DEFAULT_ADMIN_LOGIN_PATH.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config path and applies
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path()?)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Applies `UADM_API_URL` when set to a non-empty value.
    pub fn apply_env_overrides(&mut self) {
        self.override_api_url(std::env::var(API_URL_ENV).ok());
    }

    /// Replaces the base URL when `url` is non-blank.
    pub fn override_api_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
    }

    /// Validated base URL with any trailing slash removed.
    pub fn base_url(&self) -> Result<String> {
        let parsed = Url::parse(&self.api_base_url)
            .with_context(|| format!("Invalid api_base_url '{}'", self.api_base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!(
                "Invalid api_base_url '{}': scheme must be http or https",
                self.api_base_url
            );
        }
        Ok(self.api_base_url.trim_end_matches('/').to_string())
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename).
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}
