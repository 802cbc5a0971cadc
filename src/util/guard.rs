//! Router adapter that runs the navigation guard on every location change.
//!
//! SYSTEM CONTEXT
//! ==============
//! `leptos_router` has no before-each hook, so the adapter watches the
//! location and only marks a path as cleared once its verdict says
//! `Proceed`. The shell renders route content only for the cleared path;
//! a denied path never renders and is replaced in history by the login
//! redirect.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_location;

use crate::router::guard::{GuardDecision, NavigationGuard};
use crate::state::notice::NoticeState;
use crate::state::session::IdentitySource;

/// Join a pathname and search string into the guard's full path.
pub fn full_path(pathname: &str, search: &str) -> String {
    let pathname = if pathname.is_empty() { "/" } else { pathname };
    match search {
        "" | "?" => pathname.to_owned(),
        s if s.starts_with('?') => format!("{pathname}{s}"),
        s => format!("{pathname}?{s}"),
    }
}

/// Evaluate `guard` for every location change and return the path most
/// recently cleared to render.
pub fn install_navigation_guard<S, F>(
    guard: Arc<NavigationGuard<S>>,
    notices: RwSignal<NoticeState>,
    navigate: F,
) -> RwSignal<Option<String>>
where
    S: IdentitySource + 'static,
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let location = use_location();
    let cleared = RwSignal::new(None::<String>);

    Effect::new(move || {
        let to = full_path(&location.pathname.get(), &location.search.get());
        let guard = guard.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let verdict = guard.before_each(&to).await;
            if !guard.is_current(&verdict) {
                log::debug!("guard: dropping stale verdict for {to}");
                return;
            }
            match verdict.decision {
                GuardDecision::Proceed => cleared.set(Some(to)),
                GuardDecision::Redirect { to: target, notice } => {
                    notices.update(|state| {
                        state.push(notice);
                    });
                    navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
                }
            }
        });
    });

    cleared
}
