//! Shared CLI argument types
//!
//! This module contains reusable argument structs that can be flattened
//! into commands using `#[command(flatten)]`.

mod common;
mod filters;
mod global;
mod pagination;

pub use common::{OutputFormat, ResourceArg};
pub use filters::{FilterArgs, parse_group_ref, parse_indicator_ref};
pub use global::GlobalOptions;
pub use pagination::PaginationArgs;
