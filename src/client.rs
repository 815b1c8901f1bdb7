//! The request facade.
//!
//! [`ApiClient`] binds a base URL, default headers, and a timeout to one
//! `reqwest::Client`, exposes shorthand verbs that delegate to it, and runs
//! the configured [`HttpHooks`] around every call. The raw client stays
//! reachable through [`ApiClient::inner`] for anything the shorthand verbs
//! do not cover.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::{Value, json};

use crate::config::ClientConfig;
use crate::defaults;
use crate::error::FetchError;
use crate::hooks::{HttpHooks, RequestContext, ResponseEnvelope};
use crate::multipart::{FormValue, build_form};

/// Query parameters attached to a shorthand call.
pub type Query = HashMap<String, String>;

/// Per-call override fragment, merged over the call defaults. Never mutates
/// the client-level configuration.
#[derive(Clone, Debug, Default)]
pub struct CallOptions {
    /// Replaces the method-level query parameters wholesale when present.
    pub query: Option<Query>,
    /// Extra headers merged over the effective headers (override wins).
    pub headers: HashMap<String, String>,
    /// Per-request timeout overriding the client-level one.
    pub timeout: Option<Duration>,
}

enum RequestBody {
    None,
    Json(Value),
    Multipart(Vec<(String, FormValue)>),
}

/// A configured HTTP request facade over `reqwest`.
pub struct ApiClient {
    inner: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
    hooks: Option<Arc<dyn HttpHooks>>,
}

impl ApiClient {
    /// Build a client from the given configuration.
    ///
    /// Fails with [`FetchError::ConfigurationError`] when the base URL is
    /// empty or a configured header or proxy cannot be represented.
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        if config.base_url.trim().is_empty() {
            return Err(FetchError::config("base_url must not be empty"));
        }

        let headers = config.effective_headers()?;
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout.unwrap_or(defaults::http::REQUEST_TIMEOUT))
            .user_agent(
                config
                    .user_agent
                    .clone()
                    .unwrap_or_else(|| defaults::http::USER_AGENT.to_string()),
            )
            .default_headers(headers.clone());
        if let Some(connect_timeout) = config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| FetchError::config(format!("Invalid proxy URL: {e}")))?;
            builder = builder.proxy(proxy);
        }
        let inner = builder.build()?;

        Ok(Self {
            inner,
            base_url: config.base_url,
            headers,
            hooks: config.hooks,
        })
    }

    /// The raw underlying `reqwest::Client`, for advanced per-call options
    /// the shorthand verbs do not cover. It carries the configured timeout
    /// and default headers, but requests issued through it bypass the hooks.
    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }

    /// Issue a GET request.
    pub async fn get(
        &self,
        path: &str,
        query: Option<Query>,
        options: Option<CallOptions>,
    ) -> Result<Value, FetchError> {
        self.execute(
            Method::GET,
            path,
            query.unwrap_or_default(),
            RequestBody::None,
            options.unwrap_or_default(),
        )
        .await
    }

    /// Issue a POST request with a JSON body (defaults to `{}`).
    pub async fn post(
        &self,
        path: &str,
        body: Option<Value>,
        options: Option<CallOptions>,
    ) -> Result<Value, FetchError> {
        self.execute(
            Method::POST,
            path,
            Query::new(),
            RequestBody::Json(body.unwrap_or_else(|| json!({}))),
            options.unwrap_or_default(),
        )
        .await
    }

    /// Issue a PUT request with a JSON body (defaults to `{}`).
    pub async fn put(
        &self,
        path: &str,
        body: Option<Value>,
        options: Option<CallOptions>,
    ) -> Result<Value, FetchError> {
        self.execute(
            Method::PUT,
            path,
            Query::new(),
            RequestBody::Json(body.unwrap_or_else(|| json!({}))),
            options.unwrap_or_default(),
        )
        .await
    }

    /// Issue a DELETE request.
    pub async fn delete(
        &self,
        path: &str,
        query: Option<Query>,
        options: Option<CallOptions>,
    ) -> Result<Value, FetchError> {
        self.execute(
            Method::DELETE,
            path,
            query.unwrap_or_default(),
            RequestBody::None,
            options.unwrap_or_default(),
        )
        .await
    }

    /// POST a multipart form built from ordered `(name, value)` pairs.
    ///
    /// The default JSON content type is stripped from the outgoing headers
    /// so reqwest can set the `multipart/form-data` boundary itself.
    pub async fn upload(
        &self,
        path: &str,
        fields: Vec<(String, FormValue)>,
        options: Option<CallOptions>,
    ) -> Result<Value, FetchError> {
        self.execute(
            Method::POST,
            path,
            Query::new(),
            RequestBody::Multipart(fields),
            options.unwrap_or_default(),
        )
        .await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        params: Query,
        body: RequestBody,
        options: CallOptions,
    ) -> Result<Value, FetchError> {
        let url = resolve_url(&self.base_url, path);
        let ctx = RequestContext {
            method: method.clone(),
            url: url.clone(),
        };

        // Request phase: a per-call header view seeded from the defaults.
        let mut headers = self.headers.clone();
        apply_extra_headers(&mut headers, &options.headers);
        if matches!(body, RequestBody::Multipart(_)) {
            // Leave the content type to reqwest so the boundary is correct.
            headers.remove(CONTENT_TYPE);
        }
        if let Some(hooks) = &self.hooks {
            hooks.before_request(&ctx, &mut headers)?;
        }

        let query = options.query.unwrap_or(params);
        let mut builder = self.inner.request(method, &url).headers(headers);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        builder = match body {
            RequestBody::None => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(fields) => builder.multipart(build_form(fields)?),
        };
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        tracing::debug!(target: "fetchkit::http", method=%ctx.method, url=%ctx.url, "sending request");
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                let err = FetchError::Transport(e);
                self.notify_error(&ctx, &err);
                return Err(err);
            }
        };

        // Response phase.
        let status = response.status();
        let response_headers = lowercased_headers(response.headers());
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                let err = FetchError::Transport(e);
                self.notify_error(&ctx, &err);
                return Err(err);
            }
        };
        if !status.is_success() {
            let err = FetchError::Status {
                status: status.as_u16(),
                body: text,
            };
            self.notify_error(&ctx, &err);
            return Err(err);
        }
        tracing::debug!(target: "fetchkit::http", method=%ctx.method, url=%ctx.url, status=%status.as_u16(), "response received");

        let envelope = ResponseEnvelope {
            status: status.as_u16(),
            headers: response_headers,
            body: decode_body(&text),
        };
        match &self.hooks {
            Some(hooks) => hooks.after_response(&ctx, envelope),
            None => Ok(envelope.body),
        }
    }

    fn notify_error(&self, ctx: &RequestContext, error: &FetchError) {
        tracing::debug!(target: "fetchkit::http", method=%ctx.method, url=%ctx.url, err=%error, "request error");
        // The hook runs for side effects only; the error still propagates.
        if let Some(hooks) = &self.hooks {
            hooks.on_error(ctx, error);
        }
    }
}

/// Join a path onto the base URL. Absolute URLs pass through unchanged;
/// relative paths gain a leading `/` when missing.
fn resolve_url(base_url: &str, path: &str) -> String {
    if is_absolute_url(path) {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Whether the path carries its own `scheme://` prefix.
fn is_absolute_url(path: &str) -> bool {
    match path.split_once("://") {
        Some((scheme, _)) if !scheme.is_empty() => {
            scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

/// Merge extra headers into a header map (extra wins on collision).
/// Unrepresentable names or values are skipped.
fn apply_extra_headers(base: &mut HeaderMap, extra: &HashMap<String, String>) {
    for (k, v) in extra {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(k.as_bytes()),
            HeaderValue::from_str(v),
        ) {
            base.insert(name, value);
        }
    }
}

/// Response headers as a plain map with lowercased keys.
fn lowercased_headers(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}

/// Decode a response body: JSON when it parses, a JSON string otherwise,
/// `null` for empty bodies.
fn decode_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
