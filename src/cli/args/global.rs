//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};
use crate::config::Overrides;

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// Credentials and base URL: CLI flag > environment variable > config file.
/// A missing base URL falls back to the public API host.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (pretty, table, json); `None` defers to the config file
    pub format: Option<OutputFormat>,

    /// Owner override (bypasses `default_owner` in the config file)
    pub owner: Option<String>,

    /// Custom config file path (defaults to ~/.tcop/config.yaml)
    pub config: Option<String>,

    pub access_id: Option<String>,

    pub secret_key: Option<String>,

    /// API base URL, e.g. a sandbox instance
    pub base_url: Option<String>,
}

impl GlobalOptions {
    /// Called once in main.rs after parsing.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            owner: cli.owner.clone(),
            config: cli.config.clone(),
            access_id: cli.access_id.clone(),
            secret_key: cli.secret_key.clone(),
            base_url: cli.base_url.clone(),
        }
    }

    pub fn owner_ref(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Credential overrides for [`Config::with_overrides`](crate::config::Config::with_overrides)
    pub fn overrides(&self) -> Overrides {
        Overrides {
            access_id: self.access_id.clone(),
            secret_key: self.secret_key.clone(),
            base_url: self.base_url.clone(),
        }
    }
}
