//! tcop - client library and CLI for a threat-intelligence platform REST API
//!
//! The library half signs requests with the platform's `TC` HMAC scheme, maps
//! structured queries onto `/v2` resource paths and flattens response
//! envelopes into record lists. See [`client::ThreatClient`].

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod output;
