//! Read commands: list, path, resolutions, occurrences, download

use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, FilterArgs, PaginationArgs, ResourceArg};
use crate::client::{ResourceFamily, ResourceQuery, Suffix, VictimAssetKind, build_path};
use crate::error::{QueryError, Result};
use crate::output;

/// Turn list arguments into a query.
///
/// `--asset` is only meaningful for victim assets; anywhere else the path
/// builder rejects the suffix.
pub fn build_query(
    resource: ResourceArg,
    filters: &FilterArgs,
    asset: Option<VictimAssetKind>,
    pagination: &PaginationArgs,
    owner: Option<&str>,
) -> std::result::Result<ResourceQuery, QueryError> {
    let mut query = ResourceQuery::new(ResourceFamily::from(resource))
        .filter(filters.to_filter())
        .maybe_owner(owner.map(str::to_string))
        .maybe_pagination(pagination.to_pagination()?);

    if let Some(asset) = asset {
        query = query.suffix(Suffix::VictimAsset(asset));
    }

    Ok(query)
}

/// Run the list command
pub async fn list(
    opts: &GlobalOptions,
    resource: ResourceArg,
    filters: &FilterArgs,
    asset: Option<VictimAssetKind>,
    pagination: &PaginationArgs,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let query = build_query(resource, filters, asset, pagination, ctx.owner())?;
    debug!("Listing {:?}", query);

    let records = ctx.client.list(&query).await?;
    debug!(
        "Fetched {} records (resultCount {:?})",
        records.len(),
        records.result_count()
    );

    output::print(&records, ctx.format)
}

/// Print the path a list query maps to. Needs no credentials.
pub fn path(
    opts: &GlobalOptions,
    resource: ResourceArg,
    filters: &FilterArgs,
    asset: Option<VictimAssetKind>,
    pagination: &PaginationArgs,
) -> Result<()> {
    let query = build_query(resource, filters, asset, pagination, opts.owner_ref())?;
    println!("{}", build_path(&query)?);
    Ok(())
}

pub async fn resolutions(
    opts: &GlobalOptions,
    host: &str,
    pagination: &PaginationArgs,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let records = ctx
        .client
        .list_dns_resolutions(host, ctx.owner(), pagination.to_pagination()?)
        .await?;
    output::print(&records, ctx.format)
}

pub async fn occurrences(
    opts: &GlobalOptions,
    hash: &str,
    pagination: &PaginationArgs,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let records = ctx
        .client
        .list_file_occurrences(hash, ctx.owner(), pagination.to_pagination()?)
        .await?;
    output::print(&records, ctx.format)
}

/// Write the signature body to stdout unchanged
pub async fn download(opts: &GlobalOptions, id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let text = ctx.client.download_signature(id, ctx.owner()).await?;
    print!("{}", text);
    Ok(())
}
