//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::client::{Filter, ThreatClient};
use crate::config::{Config, DEFAULT_BASE_URL};
use crate::error::{ConfigError, Error, Result};

/// Config to start from: the current file, or defaults when there is none.
/// A file that exists but cannot be read or parsed is an error, so it is
/// never overwritten.
fn load_existing(path: Option<&str>) -> Result<Config> {
    match Config::load_at(path) {
        Ok(config) => Ok(config),
        Err(Error::Config(ConfigError::NotFound)) => Ok(Config::default()),
        Err(e) => Err(e),
    }
}

/// Run the init command
///
/// Prompts for credentials, checks them with one owners request and saves
/// them to the config file. Existing preferences are kept.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to tcop!".bold().green());
    println!("Let's set up your API credentials.\n");

    let theme = ColorfulTheme::default();
    let mut config = load_existing(opts.config_ref())?;

    let access_id: String = Input::with_theme(&theme)
        .with_prompt("Access ID")
        .with_initial_text(config.access_id.clone().unwrap_or_default())
        .interact_text()?;

    let secret_key: String = Password::with_theme(&theme)
        .with_prompt("Secret key")
        .interact()?;

    let base_url: String = Input::with_theme(&theme)
        .with_prompt("API base URL")
        .default(
            opts.base_url
                .clone()
                .or_else(|| config.base_url.clone())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        )
        .interact_text()?;

    config.access_id = Some(access_id.trim().to_string());
    config.secret_key = Some(secret_key);
    config.base_url = Some(base_url.trim().to_string());

    // Verify before saving
    println!("\n{}", "Checking credentials...".cyan());
    let client = ThreatClient::new(config.credentials()?, config.timeout())?;
    let owners = client.list_owners(Filter::None).await?;
    println!("{}", "✓ Credentials accepted!".green());

    if !owners.is_empty() {
        let names: Vec<&str> = owners.iter().map(|o| o.name.as_str()).collect();
        println!("Visible owners: {}", names.join(", ").dimmed());

        let default_owner: String = Input::with_theme(&theme)
            .with_prompt("Default owner (leave empty for none)")
            .allow_empty(true)
            .with_initial_text(config.default_owner.clone().unwrap_or_default())
            .interact_text()?;
        config.default_owner = Some(default_owner.trim().to_string()).filter(|o| !o.is_empty());
    }

    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "tcop status".cyan());
    println!("  {} - List owners", "tcop list owners".cyan());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_existing_missing_file_starts_fresh() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");

        let config = load_existing(path.to_str()).unwrap();
        assert!(config.access_id.is_none());
    }

    #[test]
    fn test_load_existing_keeps_current_values() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "access_id: \"12345\"\ndefault_owner: Acme Co\n").unwrap();

        let config = load_existing(path.to_str()).unwrap();
        assert_eq!(config.access_id.as_deref(), Some("12345"));
        assert_eq!(config.default_owner.as_deref(), Some("Acme Co"));
    }

    #[test]
    fn test_load_existing_rejects_corrupt_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "access_id: [unterminated").unwrap();

        assert!(load_existing(path.to_str()).is_err());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "access_id: [unterminated"
        );
    }
}
