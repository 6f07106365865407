//! Threat-intelligence API client
//!
//! A call goes through four steps:
//!
//! 1. [`path::build_path`] maps a [`ResourceQuery`] to a request path
//! 2. [`Signer`] signs method + path with the current timestamp
//! 3. [`canonical::canonicalize`] fixes the target URL, checking it still
//!    carries the signed path unchanged
//! 4. the [`Transport`] sends it and [`envelope::normalize`] flattens the reply
//!
//! Steps 1 and 3 fail before anything touches the network.

use log::{debug, warn};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::config::Credentials;
use crate::error::{Result, TransportError};

pub mod canonical;
pub mod dates;
pub mod envelope;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;
pub mod path;
pub mod query;
pub mod rate_limit;
pub mod signer;
pub mod transport;

pub use envelope::{Envelope, Records, normalize};
pub use models::{
    Attribute, EntityRef, Group, Indicator, NewAttribute, NewEmail, NewGroup, NewIncident,
    NewSignature, Owner, SecurityLabel, Tag, Victim, VictimAsset,
};
pub use pagination::{DEFAULT_RESULT_LIMIT, MAX_RESULT_LIMIT, Pagination};
pub use path::build_path;
pub use query::{
    Filter, GroupKind, IndicatorType, ResourceFamily, ResourceQuery, Suffix, VictimAssetKind,
};
pub use signer::{SignedRequest, Signer};
pub use transport::{ApiRequest, HttpTransport, Transport};

/// API client bound to one set of credentials
pub struct ThreatClient<T: Transport = HttpTransport> {
    credentials: Credentials,
    signer: Signer,
    transport: T,
}

impl ThreatClient<HttpTransport> {
    /// Create a client that talks HTTP with the given request timeout
    pub fn new(credentials: Credentials, timeout: std::time::Duration) -> Result<Self> {
        Ok(Self::with_transport(credentials, HttpTransport::new(timeout)?))
    }
}

impl<T: Transport> ThreatClient<T> {
    pub fn with_transport(credentials: Credentials, transport: T) -> Self {
        Self {
            signer: Signer::new(credentials.clone()),
            credentials,
            transport,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fix the target URL for `path` and sign its wire path.
    ///
    /// The signed path includes any prefix carried by the base URL. The
    /// signature is taken at call time; prepare again rather than reusing a
    /// request after a delay.
    pub fn prepare(&self, method: Method, path: &str, body: Option<Value>) -> Result<ApiRequest> {
        let url = canonical::canonicalize(self.credentials.base_url(), path)?;
        let signed = self
            .signer
            .sign(method.as_str(), &canonical::wire_path(&url));

        Ok(ApiRequest {
            method,
            url,
            timestamp: signed.timestamp,
            authorization: signed.authorization,
            body,
        })
    }

    async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> Result<Records> {
        let request = self.prepare(method, path, body)?;
        debug!("Sending {} {}", request.method, path);

        let envelope = self.transport.send(request).await?;
        match normalize(envelope) {
            Ok(records) => {
                debug!("Received {} records from {}", records.len(), path);
                Ok(records)
            }
            Err(failure) => {
                warn!("{} failed: {}", path, failure);
                Err(failure.into())
            }
        }
    }

    async fn execute_one<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<R> {
        let records = self.execute(method, path, body).await?;
        let first = records.first().ok_or_else(|| {
            TransportError::InvalidResponse(format!("No record returned from {}", path))
        })?;
        Ok(serde_json::from_value(first.clone())?)
    }

    // ========================================================================
    // Generic listing
    // ========================================================================

    /// Run a list query and return the flattened records.
    pub async fn list(&self, query: &ResourceQuery) -> Result<Records> {
        let path = build_path(query)?;
        self.execute(Method::GET, &path, None).await
    }

    /// Run a list query and decode every record into `R`.
    pub async fn list_as<R: DeserializeOwned>(&self, query: &ResourceQuery) -> Result<Vec<R>> {
        Ok(self.list(query).await?.deserialize()?)
    }

    // ========================================================================
    // Per-family listing
    // ========================================================================

    pub async fn list_owners(&self, filter: Filter) -> Result<Vec<Owner>> {
        self.list_as(&ResourceQuery::new(ResourceFamily::Owners).filter(filter))
            .await
    }

    pub async fn list_groups(
        &self,
        kind: GroupKind,
        filter: Filter,
        owner: Option<&str>,
        pagination: Option<Pagination>,
    ) -> Result<Vec<Group>> {
        let query = ResourceQuery::new(ResourceFamily::Group(kind))
            .filter(filter)
            .maybe_owner(owner.map(str::to_string))
            .maybe_pagination(pagination);
        self.list_as(&query).await
    }

    pub async fn list_adversaries(
        &self,
        filter: Filter,
        owner: Option<&str>,
        pagination: Option<Pagination>,
    ) -> Result<Vec<Group>> {
        self.list_groups(GroupKind::Adversaries, filter, owner, pagination)
            .await
    }

    pub async fn list_emails(
        &self,
        filter: Filter,
        owner: Option<&str>,
        pagination: Option<Pagination>,
    ) -> Result<Vec<Group>> {
        self.list_groups(GroupKind::Emails, filter, owner, pagination)
            .await
    }

    pub async fn list_incidents(
        &self,
        filter: Filter,
        owner: Option<&str>,
        pagination: Option<Pagination>,
    ) -> Result<Vec<Group>> {
        self.list_groups(GroupKind::Incidents, filter, owner, pagination)
            .await
    }

    pub async fn list_signatures(
        &self,
        filter: Filter,
        owner: Option<&str>,
        pagination: Option<Pagination>,
    ) -> Result<Vec<Group>> {
        self.list_groups(GroupKind::Signatures, filter, owner, pagination)
            .await
    }

    pub async fn list_threats(
        &self,
        filter: Filter,
        owner: Option<&str>,
        pagination: Option<Pagination>,
    ) -> Result<Vec<Group>> {
        self.list_groups(GroupKind::Threats, filter, owner, pagination)
            .await
    }

    pub async fn list_attributes(
        &self,
        filter: Filter,
        owner: Option<&str>,
        pagination: Option<Pagination>,
    ) -> Result<Vec<Attribute>> {
        self.list_family(ResourceFamily::Attributes, filter, owner, pagination)
            .await
    }

    pub async fn list_security_labels(
        &self,
        filter: Filter,
        owner: Option<&str>,
        pagination: Option<Pagination>,
    ) -> Result<Vec<SecurityLabel>> {
        self.list_family(ResourceFamily::SecurityLabels, filter, owner, pagination)
            .await
    }

    pub async fn list_tags(
        &self,
        filter: Filter,
        owner: Option<&str>,
        pagination: Option<Pagination>,
    ) -> Result<Vec<Tag>> {
        self.list_family(ResourceFamily::Tags, filter, owner, pagination)
            .await
    }

    pub async fn list_victims(
        &self,
        filter: Filter,
        owner: Option<&str>,
        pagination: Option<Pagination>,
    ) -> Result<Vec<Victim>> {
        self.list_family(ResourceFamily::Victims, filter, owner, pagination)
            .await
    }

    /// Victim assets, optionally narrowed to one asset type
    pub async fn list_victim_assets(
        &self,
        filter: Filter,
        asset: Option<VictimAssetKind>,
        owner: Option<&str>,
        pagination: Option<Pagination>,
    ) -> Result<Vec<VictimAsset>> {
        let mut query = ResourceQuery::new(ResourceFamily::VictimAssets)
            .filter(filter)
            .maybe_owner(owner.map(str::to_string))
            .maybe_pagination(pagination);
        if let Some(asset) = asset {
            query = query.suffix(Suffix::VictimAsset(asset));
        }
        self.list_as(&query).await
    }

    pub async fn list_indicators(
        &self,
        filter: Filter,
        owner: Option<&str>,
        pagination: Option<Pagination>,
    ) -> Result<Vec<Indicator>> {
        self.list_family(ResourceFamily::Indicators, filter, owner, pagination)
            .await
    }

    /// DNS resolutions recorded for a host indicator
    pub async fn list_dns_resolutions(
        &self,
        host: &str,
        owner: Option<&str>,
        pagination: Option<Pagination>,
    ) -> Result<Records> {
        let query = ResourceQuery::new(ResourceFamily::Indicators)
            .filter(Filter::ByIndicator(IndicatorType::Host, host.to_string()))
            .suffix(Suffix::DnsResolutions)
            .maybe_owner(owner.map(str::to_string))
            .maybe_pagination(pagination);
        self.list(&query).await
    }

    /// Places a file indicator was observed
    pub async fn list_file_occurrences(
        &self,
        hash: &str,
        owner: Option<&str>,
        pagination: Option<Pagination>,
    ) -> Result<Records> {
        let query = ResourceQuery::new(ResourceFamily::Indicators)
            .filter(Filter::ByIndicator(IndicatorType::File, hash.to_string()))
            .suffix(Suffix::FileOccurrences)
            .maybe_owner(owner.map(str::to_string))
            .maybe_pagination(pagination);
        self.list(&query).await
    }

    async fn list_family<R: DeserializeOwned>(
        &self,
        family: ResourceFamily,
        filter: Filter,
        owner: Option<&str>,
        pagination: Option<Pagination>,
    ) -> Result<Vec<R>> {
        let query = ResourceQuery::new(family)
            .filter(filter)
            .maybe_owner(owner.map(str::to_string))
            .maybe_pagination(pagination);
        self.list_as(&query).await
    }

    /// Raw signature file content
    pub async fn download_signature(&self, id: u64, owner: Option<&str>) -> Result<String> {
        let query = ResourceQuery::new(ResourceFamily::Group(GroupKind::Signatures))
            .filter(Filter::BySignatureDownload(id))
            .maybe_owner(owner.map(str::to_string));
        let path = build_path(&query)?;
        let request = self.prepare(Method::GET, &path, None)?;
        self.transport.send_raw(request).await
    }

    // ========================================================================
    // Groups
    // ========================================================================

    /// Create a group of `kind` from any serializable body.
    pub async fn create_group<B: Serialize>(
        &self,
        kind: GroupKind,
        body: &B,
        owner: Option<&str>,
    ) -> Result<Group> {
        let path = build_path(
            &ResourceQuery::new(ResourceFamily::Group(kind)).maybe_owner(owner.map(str::to_string)),
        )?;
        let body = serde_json::to_value(body)?;
        self.execute_one(Method::POST, &path, Some(body)).await
    }

    pub async fn create_adversary(&self, name: &str, owner: Option<&str>) -> Result<Group> {
        let body = NewGroup {
            name: name.to_string(),
        };
        self.create_group(GroupKind::Adversaries, &body, owner).await
    }

    pub async fn create_threat(&self, name: &str, owner: Option<&str>) -> Result<Group> {
        let body = NewGroup {
            name: name.to_string(),
        };
        self.create_group(GroupKind::Threats, &body, owner).await
    }

    pub async fn create_email(&self, email: &NewEmail, owner: Option<&str>) -> Result<Group> {
        self.create_group(GroupKind::Emails, email, owner).await
    }

    /// Create an incident; the event date is converted before anything is sent.
    pub async fn create_incident(
        &self,
        incident: &NewIncident,
        owner: Option<&str>,
    ) -> Result<Group> {
        let body = models::IncidentBody {
            name: incident.name.clone(),
            event_date: dates::to_platform_date(&incident.event_date)?,
        };
        self.create_group(GroupKind::Incidents, &body, owner).await
    }

    pub async fn create_signature(
        &self,
        signature: &NewSignature,
        owner: Option<&str>,
    ) -> Result<Group> {
        self.create_group(GroupKind::Signatures, signature, owner)
            .await
    }

    pub async fn delete_group(&self, kind: GroupKind, id: u64) -> Result<()> {
        self.execute(Method::DELETE, &path::group_path(kind, id), None)
            .await?;
        Ok(())
    }

    // ========================================================================
    // Attributes, tags, security labels
    // ========================================================================

    pub async fn create_attribute(
        &self,
        parent: &EntityRef,
        attribute: &NewAttribute,
    ) -> Result<Attribute> {
        let body = serde_json::to_value(attribute)?;
        self.execute_one(Method::POST, &parent.attributes_path()?, Some(body))
            .await
    }

    pub async fn set_attribute_value(
        &self,
        parent: &EntityRef,
        attribute_id: u64,
        value: &str,
    ) -> Result<Attribute> {
        self.execute_one(
            Method::PUT,
            &parent.attribute_path(attribute_id)?,
            Some(json!({ "value": value })),
        )
        .await
    }

    pub async fn delete_attribute(&self, parent: &EntityRef, attribute_id: u64) -> Result<()> {
        self.execute(Method::DELETE, &parent.attribute_path(attribute_id)?, None)
            .await?;
        Ok(())
    }

    pub async fn add_tag(&self, parent: &EntityRef, name: &str) -> Result<()> {
        self.execute(Method::POST, &parent.tag_path(name)?, None)
            .await?;
        Ok(())
    }

    pub async fn remove_tag(&self, parent: &EntityRef, name: &str) -> Result<()> {
        self.execute(Method::DELETE, &parent.tag_path(name)?, None)
            .await?;
        Ok(())
    }

    pub async fn add_security_label(&self, parent: &EntityRef, name: &str) -> Result<()> {
        self.execute(Method::POST, &parent.security_label_path(name)?, None)
            .await?;
        Ok(())
    }

    pub async fn remove_security_label(&self, parent: &EntityRef, name: &str) -> Result<()> {
        self.execute(Method::DELETE, &parent.security_label_path(name)?, None)
            .await?;
        Ok(())
    }
}
