//! Pagination argument types for CLI commands

use clap::Args;

use crate::client::{DEFAULT_RESULT_LIMIT, Pagination};
use crate::error::QueryError;

/// Shared pagination arguments for list commands.
///
/// Flatten this into any command that supports pagination:
/// ```ignore
/// List {
///     #[command(flatten)]
///     pagination: PaginationArgs,
/// }
/// ```
#[derive(Args, Debug, Default, Clone)]
pub struct PaginationArgs {
    /// Index of the first result to return
    #[arg(long, short = 's')]
    pub start: Option<u32>,

    /// Maximum results to return (1-500)
    #[arg(long, short = 'n')]
    pub limit: Option<u32>,
}

impl PaginationArgs {
    /// Convert CLI args to a result window.
    ///
    /// Returns `None` when neither flag was given so the request carries no
    /// pagination parameters at all.
    pub fn to_pagination(&self) -> Result<Option<Pagination>, QueryError> {
        if self.start.is_none() && self.limit.is_none() {
            return Ok(None);
        }

        let pagination = Pagination::new(
            self.start.unwrap_or(0),
            self.limit.unwrap_or(DEFAULT_RESULT_LIMIT),
        )?;
        Ok(Some(pagination))
    }
}
