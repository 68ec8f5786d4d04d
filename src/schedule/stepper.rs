use crate::foundation::core::{PixelBuffer, PixelIndex, Rgb8};
use crate::palette::cluster::ClusterModel;
use crate::palette::dominant::Channel;
use crate::render::plan::FramePlan;

/// A traversal made of consecutive passes, each a list of pixels.
pub(crate) trait PassSource {
    /// Number of passes.
    fn pass_count(&self) -> usize;
    /// Pixels of the pass at position `pass` in pass order.
    fn pass(&self, pass: usize) -> &[PixelIndex];
    /// Color to paint `idx` with while inside `pass`.
    fn color(&self, pass: usize, idx: PixelIndex) -> Rgb8;
    /// Whether a clear is owed when leaving a pass that painted at least one pixel.
    fn clear_between(&self) -> bool {
        false
    }
}

/// Dominant-channel passes, painted in original colors.
pub(crate) struct DominantPasses<'a> {
    pub(crate) pixels: &'a PixelBuffer,
    pub(crate) groups: &'a [Vec<PixelIndex>; 3],
    pub(crate) order: &'a [usize; 3],
}

impl PassSource for DominantPasses<'_> {
    fn pass_count(&self) -> usize {
        self.order.len()
    }

    fn pass(&self, pass: usize) -> &[PixelIndex] {
        &self.groups[self.order[pass]]
    }

    fn color(&self, _pass: usize, idx: PixelIndex) -> Rgb8 {
        self.pixels.rgb(idx)
    }
}

/// Palette-cluster passes, painted in each cluster's center color.
pub(crate) struct PalettePasses<'a> {
    pub(crate) model: &'a ClusterModel,
    pub(crate) order: &'a [usize],
    pub(crate) clear_between: bool,
}

impl PassSource for PalettePasses<'_> {
    fn pass_count(&self) -> usize {
        self.order.len()
    }

    fn pass(&self, pass: usize) -> &[PixelIndex] {
        self.model.cluster(self.order[pass])
    }

    fn color(&self, pass: usize, _idx: PixelIndex) -> Rgb8 {
        self.model.center(self.order[pass])
    }

    fn clear_between(&self) -> bool {
        self.clear_between
    }
}

/// Emit up to `budget` pixels of a linear traversal. Returns `true` once the sequence is exhausted.
pub(crate) fn step_linear(
    pixels: &PixelBuffer,
    order: Option<&[PixelIndex]>,
    channel: Option<Channel>,
    offset: &mut usize,
    budget: usize,
    plan: &mut FramePlan,
) -> bool {
    let total = pixels.pixel_count();
    let end = offset.saturating_add(budget).min(total);
    for i in *offset..end {
        let idx = order.map_or(PixelIndex(i as u32), |o| o[i]);
        let rgb = pixels.rgb(idx);
        let rgb = channel.map_or(rgb, |c| c.isolate(rgb));
        let (x, y) = pixels.coords(idx);
        plan.push_pixel(x, y, rgb);
    }
    *offset = end.max(*offset);
    *offset >= total
}

fn leave_pass<S: PassSource + ?Sized>(
    src: &S,
    pass: &mut usize,
    pos: &mut usize,
    pending_clear: &mut bool,
) {
    // Only a pass that put pixels on the surface owes a clear.
    if src.clear_between() && *pos > 0 {
        *pending_clear = true;
    }
    *pass += 1;
    *pos = 0;
}

fn skip_exhausted<S: PassSource + ?Sized>(
    src: &S,
    pass: &mut usize,
    pos: &mut usize,
    pending_clear: &mut bool,
) {
    while *pass < src.pass_count() && *pos >= src.pass(*pass).len() {
        leave_pass(src, pass, pos, pending_clear);
    }
}

/// Emit up to `budget` pixels across passes. Returns `true` once every pass is done.
///
/// Exhausted passes are crossed eagerly, so the step that paints the last pixel also reports
/// completion. An owed clear is emitted right before the next painted pixel, never at the end.
pub(crate) fn step_passes<S: PassSource + ?Sized>(
    src: &S,
    pass: &mut usize,
    pos: &mut usize,
    pending_clear: &mut bool,
    budget: usize,
    plan: &mut FramePlan,
    pixels: &PixelBuffer,
) -> bool {
    let mut painted = 0usize;
    skip_exhausted(src, pass, pos, pending_clear);
    while painted < budget && *pass < src.pass_count() {
        if *pending_clear {
            plan.push_clear();
            *pending_clear = false;
        }
        let list = src.pass(*pass);
        let take = (budget - painted).min(list.len() - *pos);
        for &idx in &list[*pos..*pos + take] {
            let (x, y) = pixels.coords(idx);
            plan.push_pixel(x, y, src.color(*pass, idx));
        }
        *pos += take;
        painted += take;
        skip_exhausted(src, pass, pos, pending_clear);
    }
    *pass >= src.pass_count()
}

/// Force the current pass to end. Returns `true` when that finishes the traversal.
pub(crate) fn advance_pass<S: PassSource + ?Sized>(
    src: &S,
    pass: &mut usize,
    pos: &mut usize,
    pending_clear: &mut bool,
) -> bool {
    if *pass < src.pass_count() {
        leave_pass(src, pass, pos, pending_clear);
        skip_exhausted(src, pass, pos, pending_clear);
    }
    *pass >= src.pass_count()
}

/// Pixels covered by completed passes plus the offset inside the current one.
pub(crate) fn pass_progress<S: PassSource + ?Sized>(src: &S, pass: usize, pos: usize) -> usize {
    let done: usize = (0..pass.min(src.pass_count()))
        .map(|p| src.pass(p).len())
        .sum();
    let current = if pass < src.pass_count() {
        pos.min(src.pass(pass).len())
    } else {
        0
    };
    done + current
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/stepper.rs"]
mod tests;
