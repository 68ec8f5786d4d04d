//! Pixelprint animates an image onto a canvas one pixel at a time.
//!
//! The host supplies a decoded RGBA8 [`PixelBuffer`] and a [`PrintConfig`]; a [`PrintSession`]
//! turns them into bounded batches of paint instructions ([`FramePlan`]) that the host executes on
//! any [`PaintSurface`] between frame delays.
//!
//! # Draw modes
//!
//! - `full`, `red`, `green`, `blue`: scan order (or a shuffled permutation), optionally keeping a
//!   single channel.
//! - `dominant`: three passes over the pixels grouped by their strongest channel.
//! - `palette`: one pass per k-means cluster, each pixel painted in its cluster's center color.
//!
//! # Design constraints
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: clustering is seeded by fixed strides, shuffles by an explicit
//!   seed.
//! - **Cooperative stepping**: a step always returns; the host owns the timer.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod palette;
mod render;
mod schedule;
mod session;

pub use assets::decode::{decode_pixels, load_pixels_from_path};
pub use foundation::core::{Dimensions, PixelBuffer, PixelIndex, Rgb8};
pub use foundation::error::{PixelprintError, PixelprintResult};
pub use foundation::math::{Rng64, shuffle};
pub use palette::cluster::{ClusterModel, MAX_ITERATIONS, MAX_SAMPLE, cluster_palette};
pub use palette::dominant::{Channel, DominantGroups};
pub use render::plan::{FramePlan, PaintOp, apply_plan};
pub use render::surface::{PaintSurface, RgbaSurface};
pub use schedule::cursor::{Progress, ScheduleCursor};
pub use schedule::mode::DrawMode;
pub use schedule::order::DrawOrders;
pub use session::config::{
    DEFAULT_FRAME_DELAY_MS, DEFAULT_PALETTE_COUNT, DEFAULT_PIXELS_PER_FRAME, PrintConfig,
};
pub use session::print_session::{FrameStep, PrintSession, RunState, StepStatus};
