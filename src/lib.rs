//! fetchkit: a small configured-request facade over [`reqwest`].
//!
//! The crate standardizes request configuration (base URL, timeout, default
//! headers), exposes shorthand verbs (`get`/`post`/`put`/`delete`/`upload`),
//! and wires three optional extension hooks around every call: before the
//! request goes out, after a successful response, and on error. Everything
//! heavier than that (transport, TLS, pooling, redirects) belongs to
//! reqwest, which stays reachable through [`ApiClient::inner`].
//!
//! # Example
//!
//! ```rust,no_run
//! use fetchkit::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), FetchError> {
//!     let client = ApiClient::new(
//!         ClientConfig::builder("https://api.example.com")
//!             .header("Authorization", "Bearer token")
//!             .build(),
//!     )?;
//!
//!     let users = client.get("/users", None, None).await?;
//!     println!("{users}");
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod defaults;
pub mod error;
pub mod hooks;
pub mod multipart;

pub use client::{ApiClient, CallOptions, Query};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::FetchError;
pub use hooks::{HttpHooks, LoggingHooks, RequestContext, ResponseEnvelope};
pub use multipart::{FilePart, FormValue};

/// Convenient imports for typical usage.
pub mod prelude {
    pub use crate::client::{ApiClient, CallOptions, Query};
    pub use crate::config::ClientConfig;
    pub use crate::error::FetchError;
    pub use crate::hooks::{HttpHooks, LoggingHooks, RequestContext, ResponseEnvelope};
    pub use crate::multipart::{FilePart, FormValue};
}
