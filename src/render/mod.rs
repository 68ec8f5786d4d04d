//! Paint instructions and the surfaces that execute them.

pub(crate) mod plan;
pub(crate) mod surface;
