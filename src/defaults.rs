//! Default configuration values.
//!
//! Centralizing defaults in one place makes them easier to document and
//! adjust without hunting through the request pipeline.

use std::time::Duration;

/// HTTP client defaults.
pub mod http {
    use super::*;

    /// Default request timeout applied when the configuration does not set one.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(10_000);

    /// Content type applied unless the caller overrides it.
    pub const CONTENT_TYPE: &str = "application/json";

    /// Default User-Agent string.
    pub const USER_AGENT: &str = concat!("fetchkit/", env!("CARGO_PKG_VERSION"));
}
