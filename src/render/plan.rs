use crate::foundation::core::Rgb8;
use crate::render::surface::PaintSurface;

/// One paint instruction emitted by the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PaintOp {
    /// Blank the whole surface.
    Clear,
    /// Mark `(x, y)` with `rgb`.
    Pixel {
        /// Column.
        x: u32,
        /// Row.
        y: u32,
        /// Color to paint.
        rgb: Rgb8,
    },
}

/// Ordered paint instructions produced by one scheduler step.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct FramePlan {
    /// Instructions in execution order.
    pub ops: Vec<PaintOp>,
}

impl FramePlan {
    /// Empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty plan with room for `n` ops.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            ops: Vec::with_capacity(n),
        }
    }

    pub(crate) fn push_pixel(&mut self, x: u32, y: u32, rgb: Rgb8) {
        self.ops.push(PaintOp::Pixel { x, y, rgb });
    }

    pub(crate) fn push_clear(&mut self) {
        self.ops.push(PaintOp::Clear);
    }

    /// `true` when the plan has no instructions.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of pixel instructions.
    pub fn pixel_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, PaintOp::Pixel { .. }))
            .count()
    }

    /// Number of clear instructions.
    pub fn clear_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, PaintOp::Clear))
            .count()
    }
}

/// Execute `plan` against `surface` in order.
pub fn apply_plan<S: PaintSurface + ?Sized>(surface: &mut S, plan: &FramePlan) {
    for op in &plan.ops {
        match *op {
            PaintOp::Clear => surface.clear(),
            PaintOp::Pixel { x, y, rgb } => surface.paint(x, y, rgb),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
