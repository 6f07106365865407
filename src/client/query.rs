//! Structured request descriptors
//!
//! A [`ResourceQuery`] names what to fetch: the resource family, at most one
//! relationship filter, an optional owner scope, pagination, and an optional
//! sub-resource. [`crate::client::path::build_path`] turns it into a request path.

use std::fmt;
use std::str::FromStr;

use super::pagination::Pagination;

/// The five group types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    Adversaries,
    Emails,
    Incidents,
    Signatures,
    Threats,
}

impl GroupKind {
    pub const ALL: [GroupKind; 5] = [
        GroupKind::Adversaries,
        GroupKind::Emails,
        GroupKind::Incidents,
        GroupKind::Signatures,
        GroupKind::Threats,
    ];

    /// Path segment under `/v2/groups/`
    pub fn segment(&self) -> &'static str {
        match self {
            GroupKind::Adversaries => "adversaries",
            GroupKind::Emails => "emails",
            GroupKind::Incidents => "incidents",
            GroupKind::Signatures => "signatures",
            GroupKind::Threats => "threats",
        }
    }

    /// Key the API uses for a single record of this kind in response data
    pub fn record_key(&self) -> &'static str {
        match self {
            GroupKind::Adversaries => "adversary",
            GroupKind::Emails => "email",
            GroupKind::Incidents => "incident",
            GroupKind::Signatures => "signature",
            GroupKind::Threats => "threat",
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for GroupKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "adversary" | "adversaries" => Ok(GroupKind::Adversaries),
            "email" | "emails" => Ok(GroupKind::Emails),
            "incident" | "incidents" => Ok(GroupKind::Incidents),
            "signature" | "signatures" => Ok(GroupKind::Signatures),
            "threat" | "threats" => Ok(GroupKind::Threats),
            other => Err(format!("unknown group type '{other}'")),
        }
    }
}

/// Observable types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Address,
    EmailAddress,
    File,
    Host,
    Url,
}

impl IndicatorType {
    pub const ALL: [IndicatorType; 5] = [
        IndicatorType::Address,
        IndicatorType::EmailAddress,
        IndicatorType::File,
        IndicatorType::Host,
        IndicatorType::Url,
    ];

    /// Path segment under `/v2/indicators/`
    pub fn segment(&self) -> &'static str {
        match self {
            IndicatorType::Address => "addresses",
            IndicatorType::EmailAddress => "emailAddresses",
            IndicatorType::File => "files",
            IndicatorType::Host => "hosts",
            IndicatorType::Url => "urls",
        }
    }

    /// Values of this type must be escaped before they go into a path
    pub fn needs_escaping(&self) -> bool {
        matches!(self, IndicatorType::Url)
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for IndicatorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "address" | "addresses" => Ok(IndicatorType::Address),
            "emailaddress" | "emailaddresses" => Ok(IndicatorType::EmailAddress),
            "file" | "files" => Ok(IndicatorType::File),
            "host" | "hosts" => Ok(IndicatorType::Host),
            "url" | "urls" => Ok(IndicatorType::Url),
            other => Err(format!("unknown indicator type '{other}'")),
        }
    }
}

/// Victim asset sub-collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VictimAssetKind {
    EmailAddress,
    NetworkAccount,
    PhoneNumber,
    SocialNetwork,
    WebSite,
}

impl VictimAssetKind {
    pub const ALL: [VictimAssetKind; 5] = [
        VictimAssetKind::EmailAddress,
        VictimAssetKind::NetworkAccount,
        VictimAssetKind::PhoneNumber,
        VictimAssetKind::SocialNetwork,
        VictimAssetKind::WebSite,
    ];

    pub fn segment(&self) -> &'static str {
        match self {
            VictimAssetKind::EmailAddress => "emailAddresses",
            VictimAssetKind::NetworkAccount => "networkAccounts",
            VictimAssetKind::PhoneNumber => "phoneNumbers",
            VictimAssetKind::SocialNetwork => "socialNetworks",
            VictimAssetKind::WebSite => "webSites",
        }
    }
}

impl FromStr for VictimAssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "emailaddress" | "emailaddresses" => Ok(VictimAssetKind::EmailAddress),
            "networkaccount" | "networkaccounts" => Ok(VictimAssetKind::NetworkAccount),
            "phonenumber" | "phonenumbers" => Ok(VictimAssetKind::PhoneNumber),
            "socialnetwork" | "socialnetworks" => Ok(VictimAssetKind::SocialNetwork),
            "website" | "websites" => Ok(VictimAssetKind::WebSite),
            other => Err(format!("unknown victim asset type '{other}'")),
        }
    }
}

/// Resource family being listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceFamily {
    Owners,
    Group(GroupKind),
    Attributes,
    SecurityLabels,
    Tags,
    Victims,
    VictimAssets,
    Indicators,
}

impl ResourceFamily {
    /// Every family, groups expanded
    pub fn all() -> Vec<ResourceFamily> {
        let mut families = vec![ResourceFamily::Owners];
        families.extend(GroupKind::ALL.iter().copied().map(ResourceFamily::Group));
        families.extend([
            ResourceFamily::Attributes,
            ResourceFamily::SecurityLabels,
            ResourceFamily::Tags,
            ResourceFamily::Victims,
            ResourceFamily::VictimAssets,
            ResourceFamily::Indicators,
        ]);
        families
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResourceFamily::Owners => "owners",
            ResourceFamily::Group(kind) => kind.segment(),
            ResourceFamily::Attributes => "attributes",
            ResourceFamily::SecurityLabels => "security labels",
            ResourceFamily::Tags => "tags",
            ResourceFamily::Victims => "victims",
            ResourceFamily::VictimAssets => "victim assets",
            ResourceFamily::Indicators => "indicators",
        }
    }
}

impl fmt::Display for ResourceFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The single relationship a query is narrowed by.
///
/// A filter naming the queried family itself selects one entity, e.g.
/// `ByParentId(Adversaries, 7)` on the adversaries family is adversary 7.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    None,
    ByParentId(GroupKind, u64),
    ByIndicator(IndicatorType, String),
    ByIndicatorType(IndicatorType),
    BySecurityLabel(String),
    ByTagName(String),
    ByVictimId(u64),
    BySignatureDownload(u64),
}

impl Filter {
    /// Human readable description, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Filter::None => "without a filter",
            Filter::ByParentId(..) => "by parent group",
            Filter::ByIndicator(..) => "by indicator",
            Filter::ByIndicatorType(_) => "by indicator type",
            Filter::BySecurityLabel(_) => "by security label",
            Filter::ByTagName(_) => "by tag",
            Filter::ByVictimId(_) => "by victim",
            Filter::BySignatureDownload(_) => "for download",
        }
    }
}

/// Sub-resource appended after the base path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suffix {
    VictimAsset(VictimAssetKind),
    DnsResolutions,
    FileOccurrences,
}

impl Suffix {
    pub fn segment(&self) -> &'static str {
        match self {
            Suffix::VictimAsset(kind) => kind.segment(),
            Suffix::DnsResolutions => "dnsResolutions",
            Suffix::FileOccurrences => "fileOccurrences",
        }
    }
}

/// A complete list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceQuery {
    pub family: ResourceFamily,
    pub filter: Filter,
    pub owner: Option<String>,
    pub pagination: Option<Pagination>,
    pub suffix: Option<Suffix>,
}

impl ResourceQuery {
    pub fn new(family: ResourceFamily) -> Self {
        Self {
            family,
            filter: Filter::None,
            owner: None,
            pagination: None,
            suffix: None,
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn maybe_owner(mut self, owner: Option<String>) -> Self {
        self.owner = owner;
        self
    }

    pub fn pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn maybe_pagination(mut self, pagination: Option<Pagination>) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn suffix(mut self, suffix: Suffix) -> Self {
        self.suffix = Some(suffix);
        self
    }
}
