//! Lookup Proxy - HTTP front end for identifier lookups.
//!
//! Exposes one read-only GET route per lookup kind and renders the canonical
//! result: the provider payload on success, `{"error": "..."}` otherwise.

pub mod api;
pub mod config;
pub mod error;

pub use config::Config;
pub use error::ProxyError;
