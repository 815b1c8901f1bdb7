//! Extension hooks for the request pipeline.
//!
//! This module defines a small, ergonomic hook API inspired by middleware
//! patterns in HTTP clients. Hooks can tweak outgoing headers before send,
//! replace the resolved value of a call after a response, and be notified of
//! errors. The hooks are best-effort and should avoid expensive work by
//! default.

use std::collections::HashMap;

use reqwest::Method;
use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::error::FetchError;

/// Context passed to hooks describing the outgoing call.
#[derive(Clone, Debug)]
pub struct RequestContext {
    /// HTTP verb of the call.
    pub method: Method,
    /// Fully resolved request URL (base URL already applied).
    pub url: String,
}

/// Decoded response handed to [`HttpHooks::after_response`].
#[derive(Clone, Debug, serde::Serialize)]
pub struct ResponseEnvelope {
    /// HTTP status code.
    pub status: u16,
    /// Response headers (lowercased keys).
    pub headers: HashMap<String, String>,
    /// Response body decoded as JSON, or a JSON string for non-JSON bodies.
    pub body: Value,
}

/// Hook set wired into the request pipeline.
///
/// All three methods have no-op defaults, so implementors override only the
/// phases they care about. A single hook set is installed per client via
/// [`ClientConfigBuilder::hooks`](crate::config::ClientConfigBuilder::hooks).
pub trait HttpHooks: Send + Sync {
    /// Called before sending a request. Hooks may add or rewrite headers in
    /// place. Returning an error short-circuits the call.
    fn before_request(
        &self,
        _ctx: &RequestContext,
        _headers: &mut HeaderMap,
    ) -> Result<(), FetchError> {
        Ok(())
    }

    /// Called after a successful response. The returned value becomes the
    /// resolved value of the call; the default returns the response body
    /// only, discarding status and headers. Returning an error turns the
    /// successful response into a failed call, which is how callers signal
    /// application-level errors embedded in HTTP-200 bodies.
    fn after_response(
        &self,
        _ctx: &RequestContext,
        response: ResponseEnvelope,
    ) -> Result<Value, FetchError> {
        Ok(response.body)
    }

    /// Called when a call fails (transport failure or non-success status).
    /// Runs for side effects only; the original error still propagates to
    /// the caller afterwards.
    fn on_error(&self, _ctx: &RequestContext, _error: &FetchError) {}
}

/// A simple logging hook set backed by `tracing` (no bodies, no auth data).
#[derive(Clone, Default)]
pub struct LoggingHooks;

impl HttpHooks for LoggingHooks {
    fn before_request(
        &self,
        ctx: &RequestContext,
        _headers: &mut HeaderMap,
    ) -> Result<(), FetchError> {
        tracing::debug!(target: "fetchkit::hooks", method=%ctx.method, url=%ctx.url, "sending request");
        Ok(())
    }

    fn after_response(
        &self,
        ctx: &RequestContext,
        response: ResponseEnvelope,
    ) -> Result<Value, FetchError> {
        tracing::debug!(target: "fetchkit::hooks", method=%ctx.method, url=%ctx.url, status=%response.status, "response received");
        Ok(response.body)
    }

    fn on_error(&self, ctx: &RequestContext, error: &FetchError) {
        tracing::debug!(target: "fetchkit::hooks", method=%ctx.method, url=%ctx.url, err=%error, "request error");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct NoOverrides;
    impl HttpHooks for NoOverrides {}

    fn envelope(body: Value) -> ResponseEnvelope {
        ResponseEnvelope {
            status: 200,
            headers: HashMap::new(),
            body,
        }
    }

    fn ctx() -> RequestContext {
        RequestContext {
            method: Method::GET,
            url: "https://api.example.com/users".to_string(),
        }
    }

    #[test]
    fn test_default_after_response_returns_body_only() {
        let body = json!({"id": 7});
        let resolved = NoOverrides
            .after_response(&ctx(), envelope(body.clone()))
            .unwrap();
        assert_eq!(resolved, body);
    }

    #[test]
    fn test_default_before_request_leaves_headers_untouched() {
        let mut headers = HeaderMap::new();
        NoOverrides.before_request(&ctx(), &mut headers).unwrap();
        assert!(headers.is_empty());
    }

    #[test]
    fn test_logging_hooks_pass_the_body_through() {
        let body = json!(["a", "b"]);
        let resolved = LoggingHooks
            .after_response(&ctx(), envelope(body.clone()))
            .unwrap();
        assert_eq!(resolved, body);
    }
}
