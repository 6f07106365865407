//! Group creation and deletion commands

use colored::Colorize;
use log::debug;

use crate::cli::CreateCommands;
use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::client::{GroupKind, NewEmail, NewIncident, NewSignature};
use crate::error::Result;
use crate::output;

/// Run a create subcommand
pub async fn create(opts: &GlobalOptions, command: CreateCommands) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let owner = ctx.owner();

    let group = match command {
        CreateCommands::Adversary { name } => ctx.client.create_adversary(&name, owner).await?,
        CreateCommands::Threat { name } => ctx.client.create_threat(&name, owner).await?,
        CreateCommands::Email {
            name,
            subject,
            header,
            body,
            to,
            from,
            score,
        } => {
            let email = NewEmail {
                name,
                subject,
                header,
                body,
                to,
                from,
                score,
            };
            ctx.client.create_email(&email, owner).await?
        }
        CreateCommands::Incident { name, event_date } => {
            let incident = NewIncident { name, event_date };
            ctx.client.create_incident(&incident, owner).await?
        }
        CreateCommands::Signature {
            name,
            file,
            file_type,
        } => {
            debug!("Reading signature from {}", file.display());
            let file_text = std::fs::read_to_string(&file)?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| name.clone());

            let signature = NewSignature {
                name,
                file_name,
                file_type,
                file_text,
            };
            ctx.client.create_signature(&signature, owner).await?
        }
    };

    output::print_record(&group, ctx.format)
}

/// Run the delete command
pub async fn delete(opts: &GlobalOptions, kind: GroupKind, id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.client.delete_group(kind, id).await?;
    println!("{} Deleted {} {}", "✓".green(), kind.record_key(), id);
    Ok(())
}
