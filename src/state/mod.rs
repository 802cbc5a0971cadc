//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` owns the logged-in identity; `notice` is the queue of messages
//! the access gate shows the user.

pub mod notice;
pub mod session;
