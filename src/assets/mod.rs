//! Host-side image loading.

pub(crate) mod decode;
