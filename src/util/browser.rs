//! Browser window side effects used by the access gate.
//!
//! SYSTEM CONTEXT
//! ==============
//! The interceptor and the login flow read the current location, load pages
//! and raise notices through `Browser` so their logic can run natively in
//! tests. `WindowBrowser` is the real implementation; outside the `csr`
//! build its window calls are no-ops.

use leptos::prelude::*;

use crate::net::intercept::CurrentLocation;
use crate::state::notice::{Notice, NoticeState};

pub trait Browser {
    /// Current pathname and full href.
    fn location(&self) -> CurrentLocation;
    /// Full page load of `href`, discarding client-side router state.
    fn hard_navigate(&self, href: &str);
    fn notify(&self, notice: Notice);
}

/// `window`-backed browser that queues notices into reactive UI state.
#[derive(Clone, Copy)]
pub struct WindowBrowser {
    notices: RwSignal<NoticeState>,
}

impl WindowBrowser {
    pub fn new(notices: RwSignal<NoticeState>) -> Self {
        Self { notices }
    }

    /// Page origin, e.g. `http://localhost:5173`.
    pub fn origin(&self) -> String {
        #[cfg(feature = "csr")]
        {
            web_sys::window()
                .and_then(|w| w.location().origin().ok())
                .unwrap_or_default()
        }
        #[cfg(not(feature = "csr"))]
        {
            String::new()
        }
    }
}

impl Browser for WindowBrowser {
    fn location(&self) -> CurrentLocation {
        #[cfg(feature = "csr")]
        {
            let Some(location) = web_sys::window().map(|w| w.location()) else {
                return CurrentLocation::default();
            };
            CurrentLocation {
                pathname: location.pathname().unwrap_or_default(),
                href: location.href().unwrap_or_default(),
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            CurrentLocation::default()
        }
    }

    fn hard_navigate(&self, href: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.location().set_href(href) {
                    log::warn!("navigation to {href} failed: {e:?}");
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = href;
        }
    }

    fn notify(&self, notice: Notice) {
        self.notices.update(|state| {
            state.push(notice);
        });
    }
}
