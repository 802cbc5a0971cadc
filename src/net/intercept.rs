//! Response interception policy for "not logged in" envelopes.
//!
//! SYSTEM CONTEXT
//! ==============
//! `HttpClient` calls `decide_on_envelope` for every 2xx response and hands
//! the resulting action to a `Browser` adapter. Keeping the decision pure lets
//! the loop-avoidance rules be tested without a window.
//!
//! INVARIANTS
//! ==========
//! The identity lookup and the login page itself never trigger a redirect;
//! these two exemptions are the only thing preventing redirect loops.

#[cfg(test)]
#[path = "intercept_test.rs"]
mod intercept_test;

use crate::config::ClientConfig;
use crate::router::login_redirect_href;

/// Snapshot of the browser location at the time a response arrives.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CurrentLocation {
    pub pathname: String,
    pub href: String,
}

impl CurrentLocation {
    #[must_use]
    pub fn new(pathname: impl Into<String>, href: impl Into<String>) -> Self {
        Self { pathname: pathname.into(), href: href.into() }
    }
}

/// What the interceptor should do after inspecting an envelope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnvelopeAction {
    None,
    /// Show the "please log in" notice and load `href` as a full page.
    RedirectToLogin { href: String },
}

/// Decide whether a response envelope requires a login redirect.
#[must_use]
pub fn decide_on_envelope(
    code: Option<i64>,
    request_url: &str,
    location: &CurrentLocation,
    config: &ClientConfig,
) -> EnvelopeAction {
    if code != Some(config.not_login_code) {
        return EnvelopeAction::None;
    }
    if is_identity_request(request_url, config) {
        return EnvelopeAction::None;
    }
    if location.pathname.contains(config.login_path.as_str()) {
        return EnvelopeAction::None;
    }
    EnvelopeAction::RedirectToLogin { href: login_redirect_href(&config.login_path, &location.href) }
}

/// Whether `request_url` targets the identity lookup endpoint.
#[must_use]
pub fn is_identity_request(request_url: &str, config: &ClientConfig) -> bool {
    let marker = config.identity_path.trim_start_matches("/api");
    !marker.is_empty() && request_url.contains(marker)
}
