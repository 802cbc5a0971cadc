//! Pre-navigation access guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Evaluated before every route transition. The first evaluation primes the
//! `SessionStore`; every later one reads the cached snapshot. Denied
//! transitions are turned into a redirect to the login page carrying the
//! requested target.
//!
//! CONCURRENCY
//! ===========
//! Per page session the guard is a two-state machine, unprimed then primed,
//! driven by the store's fetch-once flag. The snapshot is always re-read
//! after the priming await. Each evaluation is stamped with a navigation
//! generation so the router adapter can skip verdicts a newer navigation has
//! superseded; the guard itself never cancels an evaluation.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::ClientConfig;
use crate::net::types::LoginUser;
use crate::router::login_redirect_href;
use crate::router::policy::RoutePolicy;
use crate::state::notice::{NO_PERMISSION_MESSAGE, Notice};
use crate::state::session::{IdentitySource, SessionStore};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    /// Abort the transition, show `notice`, and navigate to `to` instead.
    Redirect { to: String, notice: Notice },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardVerdict {
    pub generation: u64,
    pub decision: GuardDecision,
}

pub struct NavigationGuard<S> {
    store: Arc<SessionStore<S>>,
    policy: RoutePolicy,
    login_path: String,
    generation: AtomicU64,
}

impl<S> NavigationGuard<S> {
    pub fn new(store: Arc<SessionStore<S>>, policy: RoutePolicy, login_path: impl Into<String>) -> Self {
        Self { store, policy, login_path: login_path.into(), generation: AtomicU64::new(0) }
    }

    /// Guard with the application's policy: the admin prefix requires `Admin`.
    pub fn from_config(store: Arc<SessionStore<S>>, config: &ClientConfig) -> Self {
        Self::new(store, RoutePolicy::with_admin_prefix(&config.admin_prefix), config.login_path.clone())
    }

    pub fn store(&self) -> &Arc<SessionStore<S>> {
        &self.store
    }

    /// Whether `verdict` belongs to the most recent navigation.
    pub fn is_current(&self, verdict: &GuardVerdict) -> bool {
        verdict.generation == self.generation.load(Ordering::SeqCst)
    }

    /// Decide a transition to `to` (full path with query) for `user`.
    pub fn evaluate(&self, user: &LoginUser, to: &str) -> GuardDecision {
        if self.policy.allows(user.user_role, to) {
            return GuardDecision::Proceed;
        }
        log::warn!("guard: denied {to} for role {:?}", user.user_role);
        GuardDecision::Redirect {
            to: login_redirect_href(&self.login_path, to),
            notice: Notice::warning(NO_PERMISSION_MESSAGE),
        }
    }
}

impl<S: IdentitySource> NavigationGuard<S> {
    /// Run the guard for a transition to `to`.
    pub async fn before_each(&self, to: &str) -> GuardVerdict {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let mut user = self.store.snapshot();
        if !self.store.is_primed() {
            self.store.prime().await;
            user = self.store.snapshot();
        }

        GuardVerdict { generation, decision: self.evaluate(&user, to) }
    }
}
