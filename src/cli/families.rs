//! `tcop families`: which filters each resource type accepts

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::{
    Filter, GroupKind, IndicatorType, ResourceFamily, ResourceQuery, build_path,
};
use crate::error::Result;
use crate::output::json::format_json;
use crate::output::table::format_table;

/// One row per resource family
#[derive(Debug, Tabled, Serialize)]
pub struct FamilyRow {
    #[tabled(rename = "RESOURCE")]
    pub resource: String,

    #[tabled(rename = "PATH")]
    pub path: String,

    #[tabled(rename = "FILTERS")]
    pub filters: String,
}

/// One representative of every filter kind
fn sample_filters() -> Vec<Filter> {
    vec![
        Filter::None,
        Filter::ByParentId(GroupKind::Threats, 1),
        Filter::ByIndicator(IndicatorType::Host, "example.com".to_string()),
        Filter::ByIndicatorType(IndicatorType::Host),
        Filter::BySecurityLabel("TLP".to_string()),
        Filter::ByTagName("tag".to_string()),
        Filter::ByVictimId(1),
        Filter::BySignatureDownload(1),
    ]
}

/// Flag spelling of a filter kind
fn flag(filter: &Filter) -> &'static str {
    match filter {
        Filter::None => "(none)",
        Filter::ByParentId(..) => "--group",
        Filter::ByIndicator(..) => "--indicator",
        Filter::ByIndicatorType(_) => "--indicator-type",
        Filter::BySecurityLabel(_) => "--security-label",
        Filter::ByTagName(_) => "--tag",
        Filter::ByVictimId(_) => "--victim",
        Filter::BySignatureDownload(_) => "download",
    }
}

/// Probe the path builder with every filter kind.
pub fn family_rows() -> Vec<FamilyRow> {
    let samples = sample_filters();

    ResourceFamily::all()
        .into_iter()
        .map(|family| {
            let supported: Vec<&str> = samples
                .iter()
                .filter(|f| build_path(&ResourceQuery::new(family).filter((*f).clone())).is_ok())
                .map(flag)
                .collect();

            let path = build_path(&ResourceQuery::new(family))
                .unwrap_or_else(|_| "(needs a filter)".to_string());

            FamilyRow {
                resource: family.name().to_string(),
                path,
                filters: supported.join(", "),
            }
        })
        .collect()
}

pub fn run(opts: &GlobalOptions) -> Result<()> {
    let rows = family_rows();
    match opts.format {
        Some(OutputFormat::Json) => println!("{}", format_json(&rows)?),
        _ => println!("{}", format_table(&rows)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_family_listed() {
        assert_eq!(family_rows().len(), ResourceFamily::all().len());
    }

    #[test]
    fn test_owner_filters() {
        let rows = family_rows();
        let owners = rows.iter().find(|r| r.resource == "owners").unwrap();
        assert_eq!(owners.filters, "(none), --indicator");
        assert_eq!(owners.path, "/v2/owners");
    }

    #[test]
    fn test_attributes_need_a_filter() {
        let rows = family_rows();
        let attributes = rows.iter().find(|r| r.resource == "attributes").unwrap();
        assert_eq!(attributes.path, "(needs a filter)");
        assert_eq!(attributes.filters, "--group, --indicator");
    }
}
