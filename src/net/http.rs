//! Shared HTTP client with request hooks and response interception.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every API call goes through `HttpClient::send`. Requests pass through the
//! hook chain, then the `Transport`; 2xx responses are inspected for the
//! "not logged in" envelope and handed back unchanged.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures, timeouts and non-2xx statuses are returned to the
//! caller as `HttpError` with no retry and no redirect. A 40100 envelope is
//! not an error: the interceptor redirects as a side effect and the caller
//! still receives the response.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::net::intercept::{EnvelopeAction, decide_on_envelope};
use crate::net::types::Envelope;
use crate::state::notice::{Notice, PLEASE_LOGIN_MESSAGE};
use crate::util::browser::Browser;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpError {
    #[error("request build failed: {0}")]
    Request(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("invalid response body: {0}")]
    Decode(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A fully resolved outgoing request.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
    pub timeout: Duration,
    /// Include cookies on cross-origin requests.
    pub with_credentials: bool,
}

impl ApiRequest {
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }
}

/// A transport-level response with its JSON (or raw text) body.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    /// Final URL the response came from.
    pub url: String,
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    #[must_use]
    pub fn is_success_status(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Application code from the `{code, data}` envelope, if the body has one.
    #[must_use]
    pub fn envelope_code(&self) -> Option<i64> {
        self.body.get("code").and_then(Value::as_i64)
    }

    /// Decode the body as an envelope carrying `T`.
    ///
    /// # Errors
    ///
    /// Returns `HttpError::Decode` if the body is not a matching envelope.
    pub fn envelope<T: DeserializeOwned>(&self) -> Result<Envelope<T>, HttpError> {
        serde_json::from_value(self.body.clone()).map_err(|e| HttpError::Decode(e.to_string()))
    }
}

/// Moves a request over the wire. Implementations return every HTTP status
/// as a response; only network failures and timeouts are errors.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, HttpError>;
}

/// Hook run on every outgoing request before it is sent.
pub type RequestHook = Arc<dyn Fn(ApiRequest) -> Result<ApiRequest, HttpError> + Send + Sync>;

pub struct HttpClient<T, B> {
    config: Arc<ClientConfig>,
    transport: T,
    browser: B,
    request_hooks: Vec<RequestHook>,
}

impl<T, B> HttpClient<T, B> {
    pub fn new(config: Arc<ClientConfig>, transport: T, browser: B) -> Self {
        Self { config, transport, browser, request_hooks: Vec::new() }
    }

    /// Append a request hook; hooks run in registration order.
    #[must_use]
    pub fn with_request_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(ApiRequest) -> Result<ApiRequest, HttpError> + Send + Sync + 'static,
    {
        self.request_hooks.push(Arc::new(hook));
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build a request for `path` with the configured origin, timeout and
    /// credentials mode.
    pub fn request(&self, method: Method, path: &str) -> ApiRequest {
        ApiRequest {
            method,
            url: self.config.endpoint(path),
            headers: Vec::new(),
            body: None,
            timeout: self.config.request_timeout,
            with_credentials: self.config.with_credentials,
        }
    }

    fn apply_request_hooks(&self, request: ApiRequest) -> Result<ApiRequest, HttpError> {
        self.request_hooks
            .iter()
            .try_fold(request, |request, hook| hook(request))
    }
}

impl<T: Transport, B: Browser> HttpClient<T, B> {
    /// `GET path`.
    ///
    /// # Errors
    ///
    /// See [`HttpClient::send`].
    pub async fn get(&self, path: &str) -> Result<ApiResponse, HttpError> {
        self.send(self.request(Method::Get, path)).await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `HttpError::Request` if `body` cannot be serialized, otherwise
    /// see [`HttpClient::send`].
    pub async fn post_json<P: Serialize>(&self, path: &str, body: &P) -> Result<ApiResponse, HttpError> {
        let body = serde_json::to_value(body).map_err(|e| HttpError::Request(e.to_string()))?;
        let request = self
            .request(Method::Post, path)
            .header("Content-Type", "application/json");
        self.send(ApiRequest { body: Some(body), ..request }).await
    }

    /// Run hooks, send, and intercept the response.
    ///
    /// # Errors
    ///
    /// Hook errors and transport errors are returned unchanged; a non-2xx
    /// status becomes `HttpError::Status`.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, HttpError> {
        let request = self.apply_request_hooks(request)?;
        let response = self.transport.send(request).await?;
        if !response.is_success_status() {
            return Err(HttpError::Status { status: response.status, url: response.url });
        }
        self.intercept_response(&response);
        Ok(response)
    }

    fn intercept_response(&self, response: &ApiResponse) {
        let location = self.browser.location();
        let action = decide_on_envelope(response.envelope_code(), &response.url, &location, &self.config);
        if let EnvelopeAction::RedirectToLogin { href } = action {
            log::warn!("not logged in: {} -> {href}", response.url);
            self.browser.notify(Notice::warning(PLEASE_LOGIN_MESSAGE));
            self.browser.hard_navigate(&href);
        }
    }
}
