//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - one block per record, every field shown
    Pretty,
    /// Table format - one row per record (global default)
    #[default]
    Table,
    /// JSON format - structured for scripts/APIs
    Json,
}

/// Resource families reachable from `tcop list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ResourceArg {
    Owners,
    Adversaries,
    Emails,
    Incidents,
    Signatures,
    Threats,
    Attributes,
    SecurityLabels,
    Tags,
    Victims,
    VictimAssets,
    Indicators,
}

impl From<ResourceArg> for crate::client::ResourceFamily {
    fn from(arg: ResourceArg) -> Self {
        use crate::client::{GroupKind, ResourceFamily};

        match arg {
            ResourceArg::Owners => ResourceFamily::Owners,
            ResourceArg::Adversaries => ResourceFamily::Group(GroupKind::Adversaries),
            ResourceArg::Emails => ResourceFamily::Group(GroupKind::Emails),
            ResourceArg::Incidents => ResourceFamily::Group(GroupKind::Incidents),
            ResourceArg::Signatures => ResourceFamily::Group(GroupKind::Signatures),
            ResourceArg::Threats => ResourceFamily::Group(GroupKind::Threats),
            ResourceArg::Attributes => ResourceFamily::Attributes,
            ResourceArg::SecurityLabels => ResourceFamily::SecurityLabels,
            ResourceArg::Tags => ResourceFamily::Tags,
            ResourceArg::Victims => ResourceFamily::Victims,
            ResourceArg::VictimAssets => ResourceFamily::VictimAssets,
            ResourceArg::Indicators => ResourceFamily::Indicators,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{GroupKind, ResourceFamily};

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_resource_arg_maps_to_family() {
        assert_eq!(
            ResourceFamily::from(ResourceArg::Threats),
            ResourceFamily::Group(GroupKind::Threats)
        );
        assert_eq!(
            ResourceFamily::from(ResourceArg::SecurityLabels),
            ResourceFamily::SecurityLabels
        );
    }
}
