//! Request target construction
//!
//! The signed path must be exactly what goes on the wire. URL parsers
//! normalize paths (dot segments, characters they consider unsafe), so the
//! target is parsed once here and compared back against the signed path
//! before anything is sent.

use reqwest::Url;

use crate::error::QueryError;

/// Join `base_url` and a composed `path`, verifying the path survives parsing
/// byte for byte.
///
/// `base_url` may carry its own path prefix (e.g. `https://host/api`). The
/// prefix is kept in front of `path`, so callers sign [`wire_path`] of the
/// result rather than `path` itself.
pub fn canonicalize(base_url: &str, path: &str) -> Result<Url, QueryError> {
    let base = base_url.trim_end_matches('/');
    let base_parsed =
        Url::parse(base).map_err(|_| QueryError::InvalidBaseUrl(base_url.to_string()))?;
    if base_parsed.query().is_some() || base_parsed.fragment().is_some() {
        return Err(QueryError::InvalidBaseUrl(base_url.to_string()));
    }
    let prefix = base_parsed.path().trim_end_matches('/').to_string();

    let url = Url::parse(&format!("{base}{path}"))
        .map_err(|_| QueryError::InvalidBaseUrl(base_url.to_string()))?;

    let sent = wire_path(&url);
    let expected = format!("{prefix}{path}");
    if sent != expected {
        return Err(QueryError::TargetMismatch {
            signed: path.to_string(),
            sent,
        });
    }

    Ok(url)
}

/// Path plus query string as it will appear in the request line.
pub fn wire_path(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::path::build_path;
    use crate::client::query::{Filter, IndicatorType, ResourceFamily, ResourceQuery};

    const BASE: &str = "https://api.example.com";

    #[test]
    fn test_plain_path() {
        let url = canonicalize(BASE, "/v2/groups/adversaries").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v2/groups/adversaries");
    }

    #[test]
    fn test_query_string_preserved() {
        let path = "/v2/groups/adversaries?owner=Acme%20Co&resultStart=100&resultLimit=50";
        let url = canonicalize(BASE, path).unwrap();
        assert_eq!(wire_path(&url), path);
    }

    #[test]
    fn test_escaped_url_indicator_not_reescaped() {
        let query = ResourceQuery::new(ResourceFamily::Indicators).filter(Filter::ByIndicator(
            IndicatorType::Url,
            "http://example.com/a b".to_string(),
        ));
        let signed = build_path(&query).unwrap();

        let url = canonicalize(BASE, &signed).unwrap();
        assert_eq!(wire_path(&url), signed);
        assert!(url.path().contains("%2F"));
        assert!(!url.path().contains("%252F"));
    }

    #[test]
    fn test_base_url_prefix_kept() {
        let url = canonicalize("https://sandbox.example.com/api/", "/v2/owners").unwrap();
        assert_eq!(url.as_str(), "https://sandbox.example.com/api/v2/owners");
        assert_eq!(wire_path(&url), "/api/v2/owners");
    }

    #[test]
    fn test_dot_segments_detected() {
        let err = canonicalize(BASE, "/v2/indicators/hosts/../owners").unwrap_err();
        assert!(matches!(err, QueryError::TargetMismatch { .. }));
    }

    #[test]
    fn test_unescaped_space_detected() {
        let err = canonicalize(BASE, "/v2/tags/APT 1").unwrap_err();
        match err {
            QueryError::TargetMismatch { signed, sent } => {
                assert_eq!(signed, "/v2/tags/APT 1");
                assert_eq!(sent, "/v2/tags/APT%201");
            }
            other => panic!("Expected TargetMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            canonicalize("not a url", "/v2/owners"),
            Err(QueryError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            canonicalize("https://api.example.com?x=1", "/v2/owners"),
            Err(QueryError::InvalidBaseUrl(_))
        ));
    }
}
