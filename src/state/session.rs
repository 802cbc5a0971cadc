//! Login-session store for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The single source of truth for "who is logged in". The navigation guard
//! primes it lazily on the first route change, login/logout flows replace it
//! explicitly, and UI state mirrors it through change observers.
//!
//! CONCURRENCY
//! ===========
//! The browser runs one cooperative event loop, so races are logical rather
//! than memory races. At most one identity lookup is in flight at any time:
//! a caller arriving while a lookup runs joins it and resumes once the
//! snapshot has been updated. The fetch-once flag is cleared in the same
//! critical section that claims the lookup, before the first await. After
//! priming, `prime` returns at once even if a later `fetch_identity` runs.
//!
//! ERROR HANDLING
//! ==============
//! Lookup failures never propagate. Transport errors, non-zero envelope codes
//! and empty or undecodable payloads all keep the previous snapshot.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Mutex, MutexGuard, PoisonError};

use futures::channel::oneshot;
use serde_json::Value;

use crate::net::http::HttpError;
use crate::net::types::{Envelope, LoginUser, SUCCESS_CODE};

/// Anything that can perform the identity lookup round trip.
#[allow(async_fn_in_trait)]
pub trait IdentitySource {
    /// Fetch the raw identity envelope; `data` is decoded by the store.
    async fn fetch_login_user(&self) -> Result<Envelope<Value>, HttpError>;
}

type Observer = Box<dyn Fn(&LoginUser) + Send + Sync>;

pub struct SessionStore<S> {
    source: S,
    inner: Mutex<SessionInner>,
    observers: Mutex<Vec<Observer>>,
}

struct SessionInner {
    snapshot: LoginUser,
    /// Set until the guard's first priming attempt claims the lookup.
    fetch_once: bool,
    in_flight: bool,
    /// The in-flight lookup is the one the guard primes from.
    priming: bool,
    waiters: Vec<oneshot::Sender<()>>,
}

enum Ticket {
    /// This caller performs the lookup.
    Lead,
    /// Another caller is performing it; wait for completion.
    Join(oneshot::Receiver<()>),
    Ready,
}

/// Releases the in-flight slot and wakes joiners, even if the leading
/// future is dropped before the lookup completes.
struct FlightGuard<'a> {
    inner: &'a Mutex<SessionInner>,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        let waiters = {
            let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.in_flight = false;
            inner.priming = false;
            std::mem::take(&mut inner.waiters)
        };
        for waiter in waiters {
            let _ = waiter.send(());
        }
    }
}

impl<S> SessionStore<S> {
    /// Create a store holding the anonymous sentinel. No network call is made.
    pub fn new(source: S) -> Self {
        Self {
            source,
            inner: Mutex::new(SessionInner {
                snapshot: LoginUser::anonymous(),
                fetch_once: true,
                in_flight: false,
                priming: false,
                waiters: Vec::new(),
            }),
            observers: Mutex::new(Vec::new()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Current identity snapshot.
    pub fn snapshot(&self) -> LoginUser {
        self.lock().snapshot.clone()
    }

    /// Whether the guard's one-time lookup has been claimed and finished.
    /// Lookups started by `fetch_identity` after that do not count.
    pub fn is_primed(&self) -> bool {
        let inner = self.lock();
        !inner.fetch_once && !inner.priming
    }

    /// Replace the snapshot unconditionally and notify observers.
    pub fn set_identity(&self, user: LoginUser) {
        self.lock().snapshot = user.clone();
        let observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        for observer in observers.iter() {
            observer(&user);
        }
    }

    /// Store the identity returned by a successful login.
    pub fn complete_login(&self, user: LoginUser) {
        log::info!("session: logged in as {}", user.user_name);
        self.set_identity(user);
    }

    /// Reset to the anonymous sentinel after logout.
    pub fn complete_logout(&self) {
        log::info!("session: logged out");
        self.set_identity(LoginUser::anonymous());
    }

    /// Register a callback run after every snapshot replacement.
    ///
    /// Observers must not call back into `subscribe`.
    pub fn subscribe<F>(&self, observer: F)
    where
        F: Fn(&LoginUser) + Send + Sync + 'static,
    {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(observer));
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn claim(inner: &mut SessionInner) -> Ticket {
        if inner.in_flight {
            let (tx, rx) = oneshot::channel();
            inner.waiters.push(tx);
            Ticket::Join(rx)
        } else {
            inner.in_flight = true;
            Ticket::Lead
        }
    }

    /// Apply a lookup result: replace on a well-formed success, otherwise
    /// keep the existing snapshot.
    fn apply_lookup(&self, result: Result<Envelope<Value>, HttpError>) {
        let envelope = match result {
            Ok(envelope) => envelope,
            Err(e) => {
                log::debug!("session: identity lookup failed: {e}");
                return;
            }
        };
        if envelope.code != SUCCESS_CODE {
            log::debug!("session: identity lookup returned code {}", envelope.code);
            return;
        }
        let Some(data) = envelope.data.filter(|data| !is_empty_payload(data)) else {
            log::debug!("session: identity lookup returned no data");
            return;
        };
        match serde_json::from_value::<LoginUser>(data) {
            Ok(user) => self.set_identity(user),
            Err(e) => log::debug!("session: ignoring malformed identity payload: {e}"),
        }
    }
}

impl<S: IdentitySource> SessionStore<S> {
    /// Look up the identity, joining a lookup that is already in flight.
    pub async fn fetch_identity(&self) {
        let ticket = Self::claim(&mut self.lock());
        self.run(ticket).await;
    }

    /// Guard entry point implementing the fetch-once flag.
    ///
    /// The first caller clears the flag and leads the lookup, or joins an
    /// explicit lookup already in flight. Callers that arrive while that
    /// priming lookup runs wait for it; everyone else returns immediately.
    pub async fn prime(&self) {
        let ticket = {
            let mut inner = self.lock();
            if std::mem::take(&mut inner.fetch_once) || inner.priming {
                inner.priming = true;
                Self::claim(&mut inner)
            } else {
                Ticket::Ready
            }
        };
        self.run(ticket).await;
    }

    async fn run(&self, ticket: Ticket) {
        match ticket {
            Ticket::Ready => {}
            Ticket::Join(done) => {
                // A cancelled sender also means the lookup is over.
                let _ = done.await;
            }
            Ticket::Lead => {
                let _flight = FlightGuard { inner: &self.inner };
                let result = self.source.fetch_login_user().await;
                self.apply_lookup(result);
            }
        }
    }
}

fn is_empty_payload(data: &Value) -> bool {
    match data {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
