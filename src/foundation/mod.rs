//! Shared primitives: pixel buffer types, the crate error and small math helpers.

pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;
