//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::{Config, DEFAULT_BASE_URL};
use crate::error::Result;

/// Run the status command to display configuration status
///
/// Reads local state only; no request is sent.
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "tcop Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    let file = match Config::load_at(opts.config_ref()) {
        Ok(config) => {
            println!("Config file: {}", config_path.display().to_string().cyan());
            Some(config)
        }
        Err(_) => {
            println!("{} Configuration not found", "✗".red());
            None
        }
    };
    println!();

    let config = file
        .clone()
        .unwrap_or_default()
        .with_overrides(&opts.overrides());

    match config.access_id {
        Some(ref id) => println!("{} Access ID: {}", "✓".green(), id),
        None => {
            println!("{} Access ID not configured", "✗".red());
            println!("  → Run 'tcop init' or set TCOP_ACCESS_ID");
        }
    }

    if config.secret_key.is_some() {
        println!("{} Secret key configured", "✓".green());
    } else {
        println!("{} Secret key not configured", "✗".red());
        println!("  → Run 'tcop init' or set TCOP_SECRET_KEY");
    }

    match config.base_url {
        Some(ref url) => println!("{} API base URL: {}", "✓".green(), url.cyan()),
        None => println!(
            "{} API base URL: {} (default)",
            "○".dimmed(),
            DEFAULT_BASE_URL.cyan()
        ),
    }

    match opts.owner_ref().or(config.default_owner.as_deref()) {
        Some(owner) => println!("{} Default owner: {}", "✓".green(), owner),
        None => println!("{} No default owner set", "○".dimmed()),
    }

    if let Err(e) = config.credentials() {
        println!();
        println!("{} {}", "⚠".yellow(), e);
    }

    if file.is_none() {
        println!();
        println!("Run {} to create a configuration file.", "tcop init".cyan());
    }
    println!();

    Ok(())
}
