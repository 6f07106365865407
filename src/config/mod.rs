//! Configuration management for tcop
//!
//! Credentials live in a YAML file (`~/.tcop/config.yaml` by default). Any
//! field can be overridden at runtime; the CLI feeds its flag/env values
//! through [`Overrides`] before a client is built.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Default public API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.threatconnect.com";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration as stored on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API access ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_id: Option<String>,

    /// API secret key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,

    /// API base URL (scheme, host, optional path prefix)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Default owner applied to queries that do not name one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_owner: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Runtime values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub access_id: Option<String>,
    pub secret_key: Option<String>,
    pub base_url: Option<String>,
}

/// Validated credentials, immutable for the lifetime of a client
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_id: String,
    secret_key: String,
    base_url: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_id", &self.access_id)
            .field("secret_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Credentials {
    /// Build credentials, rejecting blank fields.
    pub fn new(
        access_id: impl Into<String>,
        secret_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> std::result::Result<Self, ConfigError> {
        let access_id = access_id.into();
        let secret_key = secret_key.into();
        let base_url = base_url.into();

        if access_id.trim().is_empty() {
            return Err(ConfigError::MissingAccessId);
        }
        if secret_key.is_empty() {
            return Err(ConfigError::MissingSecretKey);
        }
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "base URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        Ok(Self {
            access_id,
            secret_key,
            base_url,
        })
    }

    pub fn access_id(&self) -> &str {
        &self.access_id
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".tcop").join("config.yaml"))
    }

    /// Resolve an optional explicit path to the file actually used
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an explicit path or the default location
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to an explicit path or the default location
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // The file holds the secret key
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Apply runtime overrides on top of the file values
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(ref id) = overrides.access_id {
            self.access_id = Some(id.clone());
        }
        if let Some(ref key) = overrides.secret_key {
            self.secret_key = Some(key.clone());
        }
        if let Some(ref url) = overrides.base_url {
            self.base_url = Some(url.clone());
        }
        self
    }

    /// Validate that the credential triple is present and well formed.
    ///
    /// A missing base URL falls back to [`DEFAULT_BASE_URL`].
    pub fn credentials(&self) -> Result<Credentials> {
        let access_id = self
            .access_id
            .clone()
            .ok_or(ConfigError::MissingAccessId)?;
        let secret_key = self
            .secret_key
            .clone()
            .ok_or(ConfigError::MissingSecretKey)?;
        let base_url = self
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Credentials::new(access_id, secret_key, base_url)?)
    }

    /// Request timeout from preferences
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.preferences.timeout_secs)
    }
}
