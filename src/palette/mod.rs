//! Pixel groupings computed once per loaded image.
//!
//! Both groupings partition every pixel index: each index lands in exactly one group.

/// Bounded k-means palette clustering.
pub mod cluster;
/// Red/green/blue dominant-channel grouping.
pub mod dominant;
