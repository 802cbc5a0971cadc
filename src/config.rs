//! Client configuration for the API transport and the access gate.
//!
//! DESIGN
//! ======
//! A browser bundle has no process environment, so overrides are baked in at
//! compile time through `option_env!` and parsed by the same lookup-driven
//! code path that tests exercise directly.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8123";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_LOGIN_PATH: &str = "/user/login";
pub const DEFAULT_IDENTITY_PATH: &str = "/api/user/get/login";
pub const DEFAULT_ADMIN_PREFIX: &str = "/admin";

/// Envelope code the backend uses for "not logged in".
pub const NOT_LOGIN_CODE: i64 = 40100;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API base URL must not be empty")]
    EmptyBaseUrl,
}

/// Transport and routing settings shared by the HTTP client and the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin every API path is joined onto, without a trailing slash.
    pub api_base_url: String,
    pub request_timeout: Duration,
    /// Send cookies on cross-origin requests.
    pub with_credentials: bool,
    pub login_path: String,
    pub identity_path: String,
    pub admin_prefix: String,
    pub not_login_code: i64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            with_credentials: true,
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            identity_path: DEFAULT_IDENTITY_PATH.to_owned(),
            admin_prefix: DEFAULT_ADMIN_PREFIX.to_owned(),
            not_login_code: NOT_LOGIN_CODE,
        }
    }
}

impl ClientConfig {
    /// Build config from values captured at compile time.
    ///
    /// Optional:
    /// - `GALLERY_API_BASE_URL`: default `http://localhost:8123`
    /// - `GALLERY_REQUEST_TIMEOUT_SECS`: default 60
    /// - `GALLERY_WITH_CREDENTIALS`: `true` (default) or `false`
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match key {
            "GALLERY_API_BASE_URL" => option_env!("GALLERY_API_BASE_URL").map(str::to_owned),
            "GALLERY_REQUEST_TIMEOUT_SECS" => option_env!("GALLERY_REQUEST_TIMEOUT_SECS").map(str::to_owned),
            "GALLERY_WITH_CREDENTIALS" => option_env!("GALLERY_WITH_CREDENTIALS").map(str::to_owned),
            _ => None,
        })
    }

    /// Build config from an arbitrary key lookup, falling back to defaults
    /// for absent or unparseable values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = match lookup("GALLERY_API_BASE_URL") {
            Some(raw) => normalize_base_url(&raw)?,
            None => defaults.api_base_url,
        };
        let timeout_secs = lookup("GALLERY_REQUEST_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        let with_credentials = lookup("GALLERY_WITH_CREDENTIALS")
            .and_then(|v| parse_bool(&v))
            .unwrap_or(defaults.with_credentials);

        Ok(Self {
            api_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            with_credentials,
            ..defaults
        })
    }

    /// Join an API path onto the configured origin.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_owned();
        }
        if path.starts_with('/') {
            format!("{}{path}", self.api_base_url)
        } else {
            format!("{}/{path}", self.api_base_url)
        }
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyBaseUrl);
    }
    Ok(trimmed.to_owned())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
