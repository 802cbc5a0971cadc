//! # gallery-client
//!
//! Leptos + WASM frontend core for the cloud picture library.
//!
//! This crate holds the pieces every page depends on: the shared HTTP client
//! with its "not logged in" interception, the single-flight session store,
//! the route access guard, and the application shell that wires them into
//! the router. Feature pages beyond login are mounted as placeholders.

pub mod app;
pub mod config;
pub mod net;
pub mod pages;
pub mod router;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;

/// Browser entry point: installs panic and log hooks, then mounts [`app::App`].
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
