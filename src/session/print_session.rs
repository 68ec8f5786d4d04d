use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::foundation::core::PixelBuffer;
use crate::foundation::math::{Rng64, mix_seed};
use crate::palette::cluster::{ClusterModel, cluster_palette};
use crate::palette::dominant::DominantGroups;
use crate::render::plan::{FramePlan, apply_plan};
use crate::render::surface::PaintSurface;
use crate::schedule::cursor::{Progress, ScheduleCursor};
use crate::schedule::mode::DrawMode;
use crate::schedule::order::DrawOrders;
use crate::schedule::stepper::{
    DominantPasses, PalettePasses, advance_pass, pass_progress, step_linear, step_passes,
};
use crate::session::config::PrintConfig;

/// Lifecycle of a print run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum RunState {
    /// Nothing is being drawn; a run must be started.
    Idle,
    /// Frame steps emit pixels.
    Running,
    /// The active mode's traversal finished. Terminal until the next run or image load.
    Complete,
}

/// Outcome of a session operation, as seen by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum StepStatus {
    /// No pixel buffer has been loaded yet.
    NotReady,
    /// Loaded, but no run is active.
    Idle,
    /// More pixels remain.
    Running,
    /// The run finished.
    Complete,
}

/// Result of one cooperative frame step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameStep {
    /// Paint instructions to execute, in order.
    pub plan: FramePlan,
    /// Progress after this step.
    pub progress: Progress,
    /// Session status after this step.
    pub status: StepStatus,
}

impl FrameStep {
    fn noop(progress: Progress, status: StepStatus) -> Self {
        Self {
            plan: FramePlan::new(),
            progress,
            status,
        }
    }

    /// `true` once the run has finished.
    pub fn is_complete(&self) -> bool {
        self.status == StepStatus::Complete
    }

    /// `true` while the host should schedule another step.
    pub fn wants_more(&self) -> bool {
        self.status == StepStatus::Running
    }
}

#[derive(Debug)]
struct LoadedImage {
    pixels: Arc<PixelBuffer>,
    dominant: Arc<DominantGroups>,
    palette: Arc<ClusterModel>,
    palette_k: usize,
}

/// Clusters beyond the pixel count could only ever be empty, so the requested count is capped
/// at the image size.
fn palette_k(pixels: &PixelBuffer, requested: usize) -> usize {
    requested.min(pixels.pixel_count())
}

fn build_palette(pixels: &PixelBuffer, k: usize) -> ClusterModel {
    if pixels.is_empty() {
        return ClusterModel::empty();
    }
    cluster_palette(pixels, k).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "palette clustering failed, palette mode disabled");
        ClusterModel::empty()
    })
}

fn dominant_passes<'a>(img: &'a LoadedImage, orders: &'a DrawOrders) -> DominantPasses<'a> {
    DominantPasses {
        pixels: &img.pixels,
        groups: orders.dominant_groups(&img.dominant),
        order: orders.dominant_pass_order(),
    }
}

fn palette_passes<'a>(
    img: &'a LoadedImage,
    orders: &'a DrawOrders,
    clear_between: bool,
) -> PalettePasses<'a> {
    PalettePasses {
        model: &img.palette,
        order: orders.palette_pass_order(),
        clear_between,
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn initial_cursors() -> [ScheduleCursor; DrawMode::COUNT] {
    DrawMode::ALL.map(ScheduleCursor::for_mode)
}

/// Explicit print context: loaded image, derived groupings, draw orders and per-mode cursors.
///
/// A session is driven cooperatively. The host calls [`PrintSession::step`] (or
/// [`PrintSession::frame_tick`]), executes the returned plan, waits
/// [`PrintSession::frame_delay`] and calls again while [`FrameStep::wants_more`] holds.
/// Every operation is a silent no-op until [`PrintSession::load_pixels`] has been called.
#[derive(Debug)]
pub struct PrintSession {
    config: PrintConfig,
    image: Option<LoadedImage>,
    orders: DrawOrders,
    cursors: [ScheduleCursor; DrawMode::COUNT],
    state: RunState,
    seed: u64,
    generation: u64,
}

impl Default for PrintSession {
    fn default() -> Self {
        Self::new(PrintConfig::default())
    }
}

impl PrintSession {
    /// Create an idle session with no image.
    pub fn new(config: PrintConfig) -> Self {
        let seed = config.seed.unwrap_or_else(clock_seed);
        Self {
            config,
            image: None,
            orders: DrawOrders::default(),
            cursors: initial_cursors(),
            state: RunState::Idle,
            seed,
            generation: 0,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &PrintConfig {
        &self.config
    }

    /// Replace the configuration.
    ///
    /// A mode change halts the run. A randomization change rebuilds orders and rewinds cursors.
    /// Other fields take effect on the next step; a new palette count re-clusters at the next
    /// run start.
    pub fn set_config(&mut self, config: PrintConfig) {
        if let Some(seed) = config.seed
            && config.seed != self.config.seed
        {
            self.seed = seed;
        }
        let mode = config.color_mode;
        let random = config.random_order;
        let prev_random = self.config.random_order;
        self.config = PrintConfig {
            color_mode: self.config.color_mode,
            random_order: prev_random,
            ..config
        };
        self.set_mode(mode);
        if random != prev_random {
            self.set_randomized(random);
        }
    }

    /// Switch the draw mode. Halts an active run without touching any cursor.
    pub fn set_mode(&mut self, mode: DrawMode) {
        if mode == self.config.color_mode {
            return;
        }
        tracing::debug!(from = %self.config.color_mode, to = %mode, "draw mode switched");
        self.config.color_mode = mode;
        if self.state != RunState::Idle {
            self.state = RunState::Idle;
        }
    }

    /// `true` once a pixel buffer is loaded.
    pub fn is_ready(&self) -> bool {
        self.image.is_some()
    }

    /// Run lifecycle state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Host-facing status.
    pub fn status(&self) -> StepStatus {
        if self.image.is_none() {
            return StepStatus::NotReady;
        }
        match self.state {
            RunState::Idle => StepStatus::Idle,
            RunState::Running => StepStatus::Running,
            RunState::Complete => StepStatus::Complete,
        }
    }

    /// Delay the host should wait before the next step.
    pub fn frame_delay(&self) -> Duration {
        self.config.frame_delay()
    }

    /// Loaded pixel buffer.
    pub fn pixels(&self) -> Option<&Arc<PixelBuffer>> {
        self.image.as_ref().map(|img| &img.pixels)
    }

    /// Dominant-channel groups of the loaded image.
    pub fn dominant_groups(&self) -> Option<&DominantGroups> {
        self.image.as_ref().map(|img| img.dominant.as_ref())
    }

    /// Palette model of the loaded image.
    pub fn cluster_model(&self) -> Option<&ClusterModel> {
        self.image.as_ref().map(|img| img.palette.as_ref())
    }

    /// Active draw orders.
    pub fn orders(&self) -> &DrawOrders {
        &self.orders
    }

    /// Cursor of `mode`.
    pub fn cursor(&self, mode: DrawMode) -> ScheduleCursor {
        self.cursors[mode.slot()]
    }

    /// Load a new image: groups pixels, clusters the palette, rebuilds orders and resets all
    /// cursors. Any active run ends.
    #[tracing::instrument(
        skip_all,
        fields(width = tracing::field::Empty, height = tracing::field::Empty)
    )]
    pub fn load_pixels(&mut self, pixels: impl Into<Arc<PixelBuffer>>) {
        let pixels = pixels.into();
        tracing::Span::current()
            .record("width", pixels.width())
            .record("height", pixels.height());

        let k = palette_k(&pixels, self.config.palette_count());
        let dominant = Arc::new(DominantGroups::from_pixels(&pixels));
        let palette = Arc::new(build_palette(&pixels, k));
        self.image = Some(LoadedImage {
            pixels,
            dominant,
            palette,
            palette_k: k,
        });
        self.state = RunState::Idle;
        self.rebuild_orders();
        self.reset_cursors();
    }

    /// Begin a new run: re-clusters if the palette count changed, rebuilds orders, rewinds every
    /// cursor and returns a plan that clears the surface.
    ///
    /// Returns an empty plan when no image is loaded.
    pub fn start_run(&mut self) -> FramePlan {
        let Some(img) = self.image.as_mut() else {
            return FramePlan::new();
        };
        let k = palette_k(&img.pixels, self.config.palette_count());
        if img.palette_k != k {
            tracing::debug!(from = img.palette_k, to = k, "palette count changed, re-clustering");
            img.palette = Arc::new(build_palette(&img.pixels, k));
            img.palette_k = k;
        }
        self.rebuild_orders();
        self.reset_cursors();
        self.state = RunState::Running;
        tracing::debug!(mode = %self.config.color_mode, "print run started");

        let mut plan = FramePlan::with_capacity(1);
        plan.push_clear();
        plan
    }

    /// [`PrintSession::start_run`] and apply the clear to `surface`.
    pub fn start_run_on<S: PaintSurface + ?Sized>(&mut self, surface: &mut S) -> StepStatus {
        let plan = self.start_run();
        apply_plan(surface, &plan);
        self.status()
    }

    /// Emit up to `pixels_per_frame` paint instructions for the active mode.
    ///
    /// No-op unless a run is active.
    pub fn step(&mut self) -> FrameStep {
        let Some(img) = &self.image else {
            return FrameStep::noop(Progress::default(), StepStatus::NotReady);
        };
        if self.state != RunState::Running {
            return FrameStep::noop(self.progress(), self.status());
        }

        let mode = self.config.color_mode;
        let budget = self.config.pixels_per_frame();
        let mut plan = FramePlan::with_capacity(budget.min(4096));
        let cursor = &mut self.cursors[mode.slot()];
        let complete = match mode {
            DrawMode::Dominant => {
                let (pass, pos, pending_clear) = cursor.pass_parts();
                let src = dominant_passes(img, &self.orders);
                step_passes(&src, pass, pos, pending_clear, budget, &mut plan, &img.pixels)
            }
            DrawMode::Palette => {
                let (pass, pos, pending_clear) = cursor.pass_parts();
                let src = palette_passes(img, &self.orders, self.config.clear_between);
                step_passes(&src, pass, pos, pending_clear, budget, &mut plan, &img.pixels)
            }
            linear => step_linear(
                &img.pixels,
                self.orders.linear(),
                linear.channel(),
                cursor.offset_mut(),
                budget,
                &mut plan,
            ),
        };
        if complete {
            self.state = RunState::Complete;
            tracing::debug!(%mode, "print run complete");
        }

        FrameStep {
            plan,
            progress: self.progress(),
            status: self.status(),
        }
    }

    /// [`PrintSession::step`] and apply the plan to `surface`.
    pub fn frame_tick<S: PaintSurface + ?Sized>(&mut self, surface: &mut S) -> FrameStep {
        let step = self.step();
        apply_plan(surface, &step.plan);
        step
    }

    /// End the current palette cluster immediately. Only acts in palette mode while running.
    pub fn advance_cluster(&mut self) -> StepStatus {
        let Some(img) = &self.image else {
            return StepStatus::NotReady;
        };
        if self.config.color_mode != DrawMode::Palette || self.state != RunState::Running {
            return self.status();
        }
        let src = palette_passes(img, &self.orders, self.config.clear_between);
        let (pass, pos, pending_clear) = self.cursors[DrawMode::Palette.slot()].pass_parts();
        if advance_pass(&src, pass, pos, pending_clear) {
            self.state = RunState::Complete;
        }
        tracing::debug!(cluster_pass = *pass, "palette cluster advanced");
        self.status()
    }

    /// Toggle randomization: rebuilds every order in place and rewinds every cursor.
    ///
    /// A running run continues from the start of the new order; a finished run returns to idle.
    pub fn set_randomized(&mut self, randomized: bool) {
        self.config.random_order = randomized;
        self.rebuild_orders();
        self.reset_cursors();
        if self.state == RunState::Complete {
            self.state = RunState::Idle;
        }
    }

    /// Progress of the active mode, derived from its cursor.
    pub fn progress(&self) -> Progress {
        let Some(img) = &self.image else {
            return Progress::default();
        };
        let total = img.pixels.pixel_count();
        let mode = self.config.color_mode;
        let painted = match (mode, self.cursors[mode.slot()]) {
            (DrawMode::Dominant, ScheduleCursor::Pass { pass, pos, .. }) => {
                pass_progress(&dominant_passes(img, &self.orders), pass, pos)
            }
            (DrawMode::Palette, ScheduleCursor::Pass { pass, pos, .. }) => pass_progress(
                &palette_passes(img, &self.orders, self.config.clear_between),
                pass,
                pos,
            ),
            (m, ScheduleCursor::Linear { offset }) if m.is_linear() => offset.min(total),
            _ => 0,
        };
        Progress {
            painted: painted as u64,
            total: total as u64,
        }
    }

    fn rebuild_orders(&mut self) {
        let Some(img) = &self.image else {
            self.orders = DrawOrders::default();
            return;
        };
        self.orders = if self.config.random_order {
            self.generation += 1;
            let mut rng = Rng64::new(mix_seed(self.seed, self.generation));
            DrawOrders::shuffled(
                img.pixels.pixel_count(),
                &img.dominant,
                img.palette.k(),
                &mut rng,
            )
        } else {
            DrawOrders::identity(img.palette.k())
        };
    }

    fn reset_cursors(&mut self) {
        self.cursors = initial_cursors();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/print_session.rs"]
mod tests;
