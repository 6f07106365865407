//! Request path composition
//!
//! Every list operation reduces to one lookup: (family, filter kind) selects a
//! path template, an optional sub-resource is appended, and owner/pagination
//! go into the query string in fixed order (`owner`, `resultStart`,
//! `resultLimit`).
//!
//! Relationship filters contribute a prefix that names the parent entity:
//!
//! ```text
//! ByParentId(G, id)   /v2/groups/G/{id}
//! ByIndicator(T, v)   /v2/indicators/T/{v}
//! BySecurityLabel(n)  /v2/securityLabels/{n}
//! ByTagName(n)        /v2/tags/{n}
//! ByVictimId(id)      /v2/victims/{id}
//! ```
//!
//! and the family contributes the child collection (`/groups/adversaries`,
//! `/indicators`, `/tags`, ...).

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::pagination::Pagination;
use super::query::{Filter, GroupKind, IndicatorType, ResourceFamily, ResourceQuery, Suffix};
use crate::error::QueryError;

/// Everything except RFC 3986 unreserved characters is escaped.
const DATA_STRING_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

const API_ROOT: &str = "/v2";

/// Percent-encode a value for use as a path segment or query value.
pub fn escape_data_string(input: &str) -> String {
    utf8_percent_encode(input, DATA_STRING_ENCODE_SET).to_string()
}

/// Base path plus whether it addresses a single entity
#[derive(Debug, PartialEq, Eq)]
struct Resolved {
    path: String,
    single: bool,
}

impl Resolved {
    fn collection(path: String) -> Self {
        Self {
            path,
            single: false,
        }
    }

    fn single(path: String) -> Self {
        Self { path, single: true }
    }
}

/// Build the request path and query string for `query`.
pub fn build_path(query: &ResourceQuery) -> Result<String, QueryError> {
    let resolved = base_path(&query.family, &query.filter)?;
    let resolved = apply_suffix(resolved, query)?;

    if resolved.single && query.pagination.is_some_and(|p| !p.is_default()) {
        return Err(QueryError::PaginationOnSingleEntity);
    }

    let owner = match query.owner.as_deref() {
        Some(o) if o.is_empty() => return Err(QueryError::EmptyValue("owner")),
        other => other,
    };

    Ok(format!(
        "{}{}",
        resolved.path,
        query_string(owner, query.pagination.as_ref())
    ))
}

/// `?owner=..&resultStart=..&resultLimit=..`, or empty when nothing applies.
pub fn query_string(owner: Option<&str>, pagination: Option<&Pagination>) -> String {
    let mut params = Vec::new();

    if let Some(owner) = owner {
        params.push(format!("owner={}", escape_data_string(owner)));
    }

    if let Some(pagination) = pagination {
        params.extend(
            pagination
                .to_query_params()
                .into_iter()
                .map(|(key, value)| format!("{key}={value}")),
        );
    }

    if params.is_empty() {
        String::new()
    } else {
        format!("?{}", params.join("&"))
    }
}

/// Path of one indicator, the value escaped when its type requires it.
pub fn indicator_path(indicator_type: IndicatorType, value: &str) -> Result<String, QueryError> {
    if value.is_empty() {
        return Err(QueryError::EmptyValue("indicator"));
    }
    let value = if indicator_type.needs_escaping() {
        escape_data_string(value)
    } else {
        value.to_string()
    };
    Ok(format!(
        "{API_ROOT}/indicators/{}/{}",
        indicator_type.segment(),
        value
    ))
}

/// Path of one group
pub fn group_path(kind: GroupKind, id: u64) -> String {
    format!("{API_ROOT}/groups/{}/{}", kind.segment(), id)
}

fn escaped_name(name: &str, what: &'static str) -> Result<String, QueryError> {
    if name.is_empty() {
        return Err(QueryError::EmptyValue(what));
    }
    Ok(escape_data_string(name))
}

/// Prefix contributed by a relationship filter; `None` for non-relationship filters.
fn relation_prefix(filter: &Filter) -> Result<Option<String>, QueryError> {
    let prefix = match filter {
        Filter::ByParentId(kind, id) => group_path(*kind, *id),
        Filter::ByIndicator(t, value) => indicator_path(*t, value)?,
        Filter::BySecurityLabel(name) => format!(
            "{API_ROOT}/securityLabels/{}",
            escaped_name(name, "security label")?
        ),
        Filter::ByTagName(name) => format!("{API_ROOT}/tags/{}", escaped_name(name, "tag")?),
        Filter::ByVictimId(id) => format!("{API_ROOT}/victims/{id}"),
        Filter::None | Filter::ByIndicatorType(_) | Filter::BySignatureDownload(_) => {
            return Ok(None);
        }
    };
    Ok(Some(prefix))
}

/// Stage A: the lookup table.
fn base_path(family: &ResourceFamily, filter: &Filter) -> Result<Resolved, QueryError> {
    use Filter as F;
    use ResourceFamily as R;

    let unsupported = || QueryError::UnsupportedFilter {
        family: family.name(),
        filter: filter.kind_name(),
    };

    let nested = |collection: &str| -> Result<Resolved, QueryError> {
        let prefix = relation_prefix(filter)?.ok_or_else(unsupported)?;
        Ok(Resolved::collection(format!("{prefix}/{collection}")))
    };

    match (family, filter) {
        (R::Owners, F::None) => Ok(Resolved::collection(format!("{API_ROOT}/owners"))),
        (R::Owners, F::ByIndicator(..)) => nested("owners"),

        (R::Group(kind), F::None) => Ok(Resolved::collection(format!(
            "{API_ROOT}/groups/{}",
            kind.segment()
        ))),
        (R::Group(kind), F::ByParentId(parent, id)) if parent == kind => {
            Ok(Resolved::single(group_path(*kind, *id)))
        }
        (R::Group(GroupKind::Signatures), F::BySignatureDownload(id)) => Ok(Resolved::single(
            format!("{}/download", group_path(GroupKind::Signatures, *id)),
        )),
        (
            R::Group(kind),
            F::ByParentId(..)
            | F::ByIndicator(..)
            | F::BySecurityLabel(_)
            | F::ByTagName(_)
            | F::ByVictimId(_),
        ) => nested(&format!("groups/{}", kind.segment())),

        (R::Attributes, F::ByParentId(..) | F::ByIndicator(..)) => nested("attributes"),

        (R::SecurityLabels, F::None) => {
            Ok(Resolved::collection(format!("{API_ROOT}/securityLabels")))
        }
        (R::SecurityLabels, F::BySecurityLabel(_)) => Ok(Resolved::single(
            relation_prefix(filter)?.ok_or_else(unsupported)?,
        )),
        (R::SecurityLabels, F::ByParentId(..) | F::ByIndicator(..)) => nested("securityLabels"),

        (R::Tags, F::None) => Ok(Resolved::collection(format!("{API_ROOT}/tags"))),
        (R::Tags, F::ByTagName(_)) => Ok(Resolved::single(
            relation_prefix(filter)?.ok_or_else(unsupported)?,
        )),
        (R::Tags, F::ByParentId(..) | F::ByIndicator(..)) => nested("tags"),

        (R::Victims, F::None) => Ok(Resolved::collection(format!("{API_ROOT}/victims"))),
        (R::Victims, F::ByVictimId(_)) => Ok(Resolved::single(
            relation_prefix(filter)?.ok_or_else(unsupported)?,
        )),
        (R::Victims, F::ByParentId(..) | F::ByIndicator(..)) => nested("victims"),

        (R::VictimAssets, F::ByParentId(..) | F::ByVictimId(_)) => nested("victimAssets"),

        (R::Indicators, F::None) => Ok(Resolved::collection(format!("{API_ROOT}/indicators"))),
        (R::Indicators, F::ByIndicatorType(t)) => Ok(Resolved::collection(format!(
            "{API_ROOT}/indicators/{}",
            t.segment()
        ))),
        (R::Indicators, F::ByIndicator(t, value)) => {
            Ok(Resolved::single(indicator_path(*t, value)?))
        }
        (
            R::Indicators,
            F::ByParentId(..) | F::BySecurityLabel(_) | F::ByTagName(_) | F::ByVictimId(_),
        ) => nested("indicators"),

        _ => Err(unsupported()),
    }
}

/// Append the sub-resource, if one was asked for and fits the query.
fn apply_suffix(resolved: Resolved, query: &ResourceQuery) -> Result<Resolved, QueryError> {
    let Some(suffix) = query.suffix else {
        return Ok(resolved);
    };

    let fits = match (suffix, &query.family, &query.filter) {
        (Suffix::VictimAsset(_), ResourceFamily::VictimAssets, _) => true,
        (
            Suffix::DnsResolutions,
            ResourceFamily::Indicators,
            Filter::ByIndicator(IndicatorType::Host, _),
        ) => true,
        (
            Suffix::FileOccurrences,
            ResourceFamily::Indicators,
            Filter::ByIndicator(IndicatorType::File, _),
        ) => true,
        _ => false,
    };

    if !fits {
        return Err(QueryError::UnsupportedSuffix {
            suffix: suffix.segment(),
        });
    }

    Ok(Resolved::collection(format!(
        "{}/{}",
        resolved.path,
        suffix.segment()
    )))
}
