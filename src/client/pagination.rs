//! Result paging for list requests
//!
//! The API pages collections with `resultStart` (offset) and `resultLimit`
//! (page size, 1..=500, default 100). Defaults are never sent.

use crate::error::QueryError;

/// Page size the API uses when `resultLimit` is absent
pub const DEFAULT_RESULT_LIMIT: u32 = 100;

/// Largest page size the API accepts
pub const MAX_RESULT_LIMIT: u32 = 500;

/// Pagination parameters for list requests.
///
/// # Example
/// ```
/// use tcop::client::Pagination;
///
/// let page = Pagination::new(100, 50).unwrap();
/// assert_eq!(page.to_query_params().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    start: u32,
    limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            start: 0,
            limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Create pagination with an explicit offset and page size.
    pub fn new(start: u32, limit: u32) -> Result<Self, QueryError> {
        Self::default().with_start(start).with_limit(limit)
    }

    /// Set the result offset.
    pub fn with_start(mut self, start: u32) -> Self {
        self.start = start;
        self
    }

    /// Set the page size, rejecting values outside 1..=500.
    pub fn with_limit(mut self, limit: u32) -> Result<Self, QueryError> {
        if !(1..=MAX_RESULT_LIMIT).contains(&limit) {
            return Err(QueryError::InvalidLimit(limit));
        }
        self.limit = limit;
        Ok(self)
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Pagination for the page after this one
    pub fn next_page(&self) -> Self {
        Self {
            start: self.start.saturating_add(self.limit),
            limit: self.limit,
        }
    }

    /// Convert to query string parameters, in wire order.
    ///
    /// `resultStart` is left out when zero, `resultLimit` when it equals the
    /// API default.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if self.start != 0 {
            params.push(("resultStart", self.start.to_string()));
        }

        if self.limit != DEFAULT_RESULT_LIMIT {
            params.push(("resultLimit", self.limit.to_string()));
        }

        params
    }

    /// True when nothing would be sent
    pub fn is_default(&self) -> bool {
        self.to_query_params().is_empty()
    }
}
