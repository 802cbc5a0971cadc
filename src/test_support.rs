//! In-memory doubles shared by unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};

use crate::net::http::{ApiRequest, ApiResponse, HttpError, Transport};
use crate::net::intercept::CurrentLocation;
use crate::net::types::Envelope;
use crate::state::notice::Notice;
use crate::state::session::IdentitySource;
use crate::util::browser::Browser;

pub fn admin_payload() -> Value {
    json!({ "id": 1, "userAccount": "root", "userName": "Root", "userRole": "admin" })
}

pub fn user_payload() -> Value {
    json!({ "id": 2, "userAccount": "alice", "userName": "Alice", "userRole": "user" })
}

/// Identity source replying with a fixed result after yielding `yields`
/// times to the scheduler, so concurrent callers can pile up.
pub struct ScriptedSource {
    calls: AtomicUsize,
    yields: usize,
    reply: Result<Envelope<Value>, HttpError>,
}

impl ScriptedSource {
    pub fn replying(code: i64, data: Option<Value>) -> Self {
        Self { calls: AtomicUsize::new(0), yields: 3, reply: Ok(Envelope { code, data, message: None }) }
    }

    pub fn failing(error: HttpError) -> Self {
        Self { calls: AtomicUsize::new(0), yields: 3, reply: Err(error) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IdentitySource for ScriptedSource {
    async fn fetch_login_user(&self) -> Result<Envelope<Value>, HttpError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        for _ in 0..self.yields {
            tokio::task::yield_now().await;
        }
        self.reply.clone()
    }
}

/// Transport answering from a queue of canned responses and recording every
/// request it sees. An empty queue yields a network error.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<ApiResponse, HttpError>>>,
    pub sent: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    #[must_use]
    pub fn reply(self, status: u16, body: Value) -> Self {
        self.replies.lock().unwrap().push_back(Ok(ApiResponse { url: String::new(), status, body }));
        self
    }

    #[must_use]
    pub fn fail(self, error: HttpError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn sent_urls(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|r| r.url.clone()).collect()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, HttpError> {
        let url = request.url.clone();
        self.sent.lock().unwrap().push(request);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::Network("no scripted reply".to_owned())));
        reply.map(|response| ApiResponse { url, ..response })
    }
}

/// Browser recording navigations and notices at a fixed location.
pub struct RecordingBrowser {
    location: CurrentLocation,
    pub navigations: Mutex<Vec<String>>,
    pub notices: Mutex<Vec<Notice>>,
}

impl RecordingBrowser {
    pub fn at(pathname: &str, href: &str) -> Self {
        Self {
            location: CurrentLocation::new(pathname, href),
            navigations: Mutex::new(Vec::new()),
            notices: Mutex::new(Vec::new()),
        }
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Browser for RecordingBrowser {
    fn location(&self) -> CurrentLocation {
        self.location.clone()
    }

    fn hard_navigate(&self, href: &str) {
        self.navigations.lock().unwrap().push(href.to_owned());
    }

    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}
