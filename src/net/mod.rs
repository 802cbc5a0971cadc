//! Networking modules for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` is the shared client and interception layer, `intercept` holds the
//! pure redirect policy, `transport` moves requests over browser `fetch`,
//! `api` wraps the session endpoints, and `types` defines the wire schema.

pub mod api;
pub mod http;
pub mod intercept;
pub mod transport;
pub mod types;
