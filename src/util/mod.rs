//! Browser glue shared by the shell and the network layer.

pub mod browser;
pub mod guard;
