//! Client configuration types.
//!
//! This module defines [`ClientConfig`] and its builder, used to configure
//! one [`ApiClient`](crate::ApiClient). The configuration is immutable once
//! the client is constructed; per-call tweaks go through
//! [`CallOptions`](crate::client::CallOptions) instead.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

use crate::defaults;
use crate::error::FetchError;
use crate::hooks::HttpHooks;

/// Configuration for [`ApiClient`](crate::ApiClient).
#[derive(Clone)]
pub struct ClientConfig {
    /// Base address every relative path is joined onto. Required, non-empty.
    pub base_url: String,
    /// Request timeout. Defaults to
    /// [`defaults::http::REQUEST_TIMEOUT`](crate::defaults::http::REQUEST_TIMEOUT)
    /// when unset.
    pub timeout: Option<Duration>,
    /// Connection timeout.
    pub connect_timeout: Option<Duration>,
    /// Custom default headers, merged over `Content-Type: application/json`
    /// (caller wins on collision).
    pub headers: HashMap<String, String>,
    /// Proxy settings.
    pub proxy: Option<String>,
    /// User agent.
    pub user_agent: Option<String>,
    /// Optional hook set wired into the request pipeline.
    pub hooks: Option<Arc<dyn HttpHooks>>,
}

impl ClientConfig {
    /// Create a configuration with the given base URL and all defaults.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
            connect_timeout: None,
            headers: HashMap::new(),
            proxy: None,
            user_agent: None,
            hooks: None,
        }
    }

    /// Returns a builder for constructing a configuration.
    pub fn builder(base_url: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder::new(base_url)
    }

    /// Compute the effective default headers: the built-in JSON content type
    /// overridden by the caller-supplied headers. Header names are
    /// case-insensitive, so a caller `content-type` replaces the default.
    pub fn effective_headers(&self) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static(defaults::http::CONTENT_TYPE),
        );
        for (k, v) in &self.headers {
            let name = HeaderName::from_bytes(k.as_bytes())
                .map_err(|e| FetchError::config(format!("Invalid header name '{k}': {e}")))?;
            let value = HeaderValue::from_str(v)
                .map_err(|e| FetchError::config(format!("Invalid header value for '{k}': {e}")))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("headers", &self.headers)
            .field("proxy", &self.proxy)
            .field("user_agent", &self.user_agent)
            .field("hooks", &self.hooks.is_some())
            .finish()
    }
}

/// Builder for [`ClientConfig`] to construct configuration in a unified and
/// safe way.
#[derive(Clone)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            config: ClientConfig::new(base_url),
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.config.connect_timeout = Some(connect_timeout);
        self
    }

    /// Add a single default header.
    pub fn header<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.config.headers.insert(key.into(), value.into());
        self
    }

    /// Add multiple default headers.
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.config.headers.extend(headers);
        self
    }

    /// Set a proxy URL.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.config.proxy = Some(proxy.into());
        self
    }

    /// Set the User-Agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Install the hook set invoked around every call.
    pub fn hooks(mut self, hooks: Arc<dyn HttpHooks>) -> Self {
        self.config.hooks = Some(hooks);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
