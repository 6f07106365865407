//! Filter argument types for CLI commands

use clap::{ArgGroup, Args};

use crate::client::{Filter, GroupKind, IndicatorType};

/// Parse `<TYPE>:<ID>`, e.g. `adversary:7`.
pub fn parse_group_ref(s: &str) -> Result<(GroupKind, u64), String> {
    let (kind, id) = s
        .split_once(':')
        .ok_or_else(|| format!("expected <TYPE>:<ID>, got '{s}'"))?;
    let kind = kind.parse::<GroupKind>()?;
    let id = id
        .parse::<u64>()
        .map_err(|_| format!("invalid group id '{id}'"))?;
    Ok((kind, id))
}

/// Parse `<TYPE>:<VALUE>`, e.g. `host:evil.example.com`.
///
/// Only the first `:` separates; URL values keep theirs.
pub fn parse_indicator_ref(s: &str) -> Result<(IndicatorType, String), String> {
    let (kind, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected <TYPE>:<VALUE>, got '{s}'"))?;
    if value.is_empty() {
        return Err("indicator value is empty".to_string());
    }
    Ok((kind.parse::<IndicatorType>()?, value.to_string()))
}

/// Relationship filter for list commands. At most one may be given.
#[derive(Args, Debug, Clone, Default)]
#[command(group(
    ArgGroup::new("filter")
        .args(["group", "indicator", "indicator_type", "security_label", "tag", "victim"])
        .multiple(false)
))]
pub struct FilterArgs {
    /// Related to a group, as <TYPE>:<ID> (the listed type itself looks up one record)
    #[arg(long, value_name = "TYPE:ID", value_parser = parse_group_ref)]
    pub group: Option<(GroupKind, u64)>,

    /// Related to an indicator, as <TYPE>:<VALUE>
    #[arg(long, value_name = "TYPE:VALUE", value_parser = parse_indicator_ref)]
    pub indicator: Option<(IndicatorType, String)>,

    /// Indicators of one type (address, emailAddress, file, host, url)
    #[arg(long = "indicator-type", value_name = "TYPE")]
    pub indicator_type: Option<IndicatorType>,

    /// Carrying a security label
    #[arg(long = "security-label", value_name = "NAME")]
    pub security_label: Option<String>,

    /// Carrying a tag
    #[arg(long, value_name = "NAME")]
    pub tag: Option<String>,

    /// Related to a victim
    #[arg(long, value_name = "ID")]
    pub victim: Option<u64>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> Filter {
        if let Some((kind, id)) = self.group {
            Filter::ByParentId(kind, id)
        } else if let Some((ref t, ref value)) = self.indicator {
            Filter::ByIndicator(*t, value.clone())
        } else if let Some(t) = self.indicator_type {
            Filter::ByIndicatorType(t)
        } else if let Some(ref name) = self.security_label {
            Filter::BySecurityLabel(name.clone())
        } else if let Some(ref name) = self.tag {
            Filter::ByTagName(name.clone())
        } else if let Some(id) = self.victim {
            Filter::ByVictimId(id)
        } else {
            Filter::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_group_ref() {
        assert_eq!(
            parse_group_ref("adversary:7").unwrap(),
            (GroupKind::Adversaries, 7)
        );
        assert!(parse_group_ref("adversary").is_err());
        assert!(parse_group_ref("adversary:x").is_err());
        assert!(parse_group_ref("widget:1").is_err());
    }

    #[test]
    fn test_parse_indicator_ref_keeps_url_colons() {
        assert_eq!(
            parse_indicator_ref("url:http://example.com/a").unwrap(),
            (IndicatorType::Url, "http://example.com/a".to_string())
        );
        assert!(parse_indicator_ref("host:").is_err());
    }

    #[test]
    fn test_to_filter() {
        let args = FilterArgs {
            tag: Some("APT 1".to_string()),
            ..Default::default()
        };
        assert_eq!(args.to_filter(), Filter::ByTagName("APT 1".to_string()));
        assert_eq!(FilterArgs::default().to_filter(), Filter::None);
    }
}
