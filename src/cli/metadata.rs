//! Attribute, tag and security label commands

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::{AttributeCommands, CommandContext, LabelCommands, TargetArgs};
use crate::client::{EntityRef, NewAttribute};
use crate::error::{Error, QueryError, Result};
use crate::output;

impl TargetArgs {
    /// The entity a metadata command applies to
    pub fn entity(&self) -> Result<EntityRef> {
        if let Some((kind, id)) = self.group {
            return Ok(EntityRef::Group(kind, id));
        }
        if let Some((t, ref value)) = self.indicator {
            return Ok(EntityRef::Indicator(t, value.clone()));
        }
        // clap enforces one of the two
        Err(Error::Query(QueryError::EmptyValue("target")))
    }
}

/// Run an attribute subcommand
pub async fn attribute(opts: &GlobalOptions, command: AttributeCommands) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    match command {
        AttributeCommands::Add {
            target,
            attribute_type,
            value,
            displayed,
        } => {
            let attribute = NewAttribute {
                attribute_type,
                value,
                displayed: displayed.then_some(true),
            };
            let created = ctx
                .client
                .create_attribute(&target.entity()?, &attribute)
                .await?;
            output::print_record(&created, ctx.format)
        }
        AttributeCommands::Set { target, id, value } => {
            let updated = ctx
                .client
                .set_attribute_value(&target.entity()?, id, &value)
                .await?;
            output::print_record(&updated, ctx.format)
        }
        AttributeCommands::Delete { target, id } => {
            ctx.client.delete_attribute(&target.entity()?, id).await?;
            println!("{} Deleted attribute {}", "✓".green(), id);
            Ok(())
        }
    }
}

/// Run a tag subcommand
pub async fn tag(opts: &GlobalOptions, command: LabelCommands) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    match command {
        LabelCommands::Add { target, name } => {
            ctx.client.add_tag(&target.entity()?, &name).await?;
            println!("{} Tagged {}", "✓".green(), name.bold());
        }
        LabelCommands::Remove { target, name } => {
            ctx.client.remove_tag(&target.entity()?, &name).await?;
            println!("{} Removed tag {}", "✓".green(), name.bold());
        }
    }
    Ok(())
}

/// Run a security label subcommand
pub async fn label(opts: &GlobalOptions, command: LabelCommands) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    match command {
        LabelCommands::Add { target, name } => {
            ctx.client
                .add_security_label(&target.entity()?, &name)
                .await?;
            println!("{} Applied security label {}", "✓".green(), name.bold());
        }
        LabelCommands::Remove { target, name } => {
            ctx.client
                .remove_security_label(&target.entity()?, &name)
                .await?;
            println!("{} Removed security label {}", "✓".green(), name.bold());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{GroupKind, IndicatorType};

    #[test]
    fn test_target_entity() {
        let target = TargetArgs {
            group: Some((GroupKind::Incidents, 8)),
            indicator: None,
        };
        assert_eq!(target.entity().unwrap(), EntityRef::Group(GroupKind::Incidents, 8));

        let target = TargetArgs {
            group: None,
            indicator: Some((IndicatorType::Address, "10.0.0.1".to_string())),
        };
        assert_eq!(
            target.entity().unwrap(),
            EntityRef::Indicator(IndicatorType::Address, "10.0.0.1".to_string())
        );
    }

    #[test]
    fn test_target_missing() {
        let target = TargetArgs {
            group: None,
            indicator: None,
        };
        assert!(target.entity().is_err());
    }
}
