//! Command execution context
//!
//! Loads configuration, applies CLI overrides and builds the client once per
//! command so handlers only deal with their own arguments.

use clap::ValueEnum;
use log::{debug, warn};

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::ThreatClient;
use crate::config::Config;
use crate::error::{ConfigError, Error, Result};

/// Context for command execution: client plus resolved runtime options.
pub struct CommandContext {
    pub client: ThreatClient,
    /// Resolved output format
    pub format: OutputFormat,
    /// Owner from `--owner`, else the config's `default_owner`
    pub owner: Option<String>,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// A missing config file is not fatal on its own: credentials may come
    /// entirely from flags or environment.
    ///
    /// # Errors
    /// Returns error if the config file is unreadable or credentials are incomplete.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = match Config::load_at(opts.config_ref()) {
            Ok(config) => config,
            Err(Error::Config(ConfigError::NotFound)) => {
                debug!("No config file, relying on flags and environment");
                Config::default()
            }
            Err(e) => return Err(e),
        }
        .with_overrides(&opts.overrides());

        let credentials = config.credentials()?;
        debug!("Using API at {}", credentials.base_url());

        let client = ThreatClient::new(credentials, config.timeout())?;
        let format = resolve_format(opts.format, config.preferences.format.as_deref());
        let owner = opts
            .owner
            .clone()
            .or_else(|| config.default_owner.clone());

        Ok(Self {
            client,
            format,
            owner,
        })
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }
}

/// Flag wins, then the config preference, then the table default.
fn resolve_format(flag: Option<OutputFormat>, preference: Option<&str>) -> OutputFormat {
    if let Some(format) = flag {
        return format;
    }

    match preference.map(|p| OutputFormat::from_str(p, true)) {
        Some(Ok(format)) => format,
        Some(Err(_)) => {
            warn!("Ignoring unknown output format in config: {:?}", preference);
            OutputFormat::default()
        }
        None => OutputFormat::default(),
    }
}
