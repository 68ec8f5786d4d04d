//! Session-oriented printing API.

pub(crate) mod config;
pub(crate) mod print_session;
