//! Incremental draw scheduling: modes, draw orders, cursors and per-mode steppers.

pub(crate) mod cursor;
pub(crate) mod mode;
pub(crate) mod order;
pub(crate) mod stepper;
