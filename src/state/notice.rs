//! User-visible notices raised by the access gate.
//!
//! DESIGN
//! ======
//! Only two failures ever reach the user: the guard's "no permission" warning
//! and the interceptor's "please log in" notice. Both land in one bounded
//! queue that the shell renders.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

pub const NO_PERMISSION_MESSAGE: &str = "You do not have permission to access this page!";
pub const PLEASE_LOGIN_MESSAGE: &str = "Please log in first";

/// Oldest notices are dropped beyond this many.
pub const MAX_VISIBLE_NOTICES: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

/// Queue of notices currently on screen, each tagged with a stable id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoticeState {
    pub items: Vec<(u64, Notice)>,
    next_id: u64,
}

impl NoticeState {
    /// Append a notice and return its id.
    pub fn push(&mut self, notice: Notice) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push((id, notice));
        if self.items.len() > MAX_VISIBLE_NOTICES {
            let overflow = self.items.len() - MAX_VISIBLE_NOTICES;
            self.items.drain(..overflow);
        }
        id
    }

    /// Remove the notice with `id`; returns whether it was present.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|(item_id, _)| *item_id != id);
        self.items.len() != before
    }
}
