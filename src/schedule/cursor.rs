use crate::schedule::mode::DrawMode;

/// Resumable position of one mode's traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScheduleCursor {
    /// Offset into a single pixel sequence.
    Linear {
        /// Pixels already emitted.
        offset: usize,
    },
    /// Position inside a sequence of passes.
    Pass {
        /// Index into the pass order.
        pass: usize,
        /// Pixels already emitted from the current pass.
        pos: usize,
        /// A clear is owed before the next painted pixel.
        pending_clear: bool,
    },
}

impl ScheduleCursor {
    /// Initial linear cursor.
    pub const fn linear() -> Self {
        Self::Linear { offset: 0 }
    }

    /// Initial pass cursor.
    pub const fn pass() -> Self {
        Self::Pass {
            pass: 0,
            pos: 0,
            pending_clear: false,
        }
    }

    /// Rewind to the initial position, keeping the cursor kind.
    pub fn reset(&mut self) {
        *self = match self {
            Self::Linear { .. } => Self::linear(),
            Self::Pass { .. } => Self::pass(),
        };
    }

    /// Initial cursor for `mode`.
    pub fn for_mode(mode: DrawMode) -> Self {
        if mode.is_linear() {
            Self::linear()
        } else {
            Self::pass()
        }
    }

    pub(crate) fn offset_mut(&mut self) -> &mut usize {
        if !matches!(self, Self::Linear { .. }) {
            *self = Self::linear();
        }
        match self {
            Self::Linear { offset } => offset,
            Self::Pass { .. } => unreachable!("cursor was just set to a linear cursor"),
        }
    }

    pub(crate) fn pass_parts(&mut self) -> (&mut usize, &mut usize, &mut bool) {
        if !matches!(self, Self::Pass { .. }) {
            *self = Self::pass();
        }
        match self {
            Self::Pass {
                pass,
                pos,
                pending_clear,
            } => (pass, pos, pending_clear),
            Self::Linear { .. } => unreachable!("cursor was just set to a pass cursor"),
        }
    }
}

/// Painted vs. total pixel counts of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Progress {
    /// Pixels covered by the cursor so far.
    pub painted: u64,
    /// Pixels in the image.
    pub total: u64,
}

impl Progress {
    /// Fraction in `[0, 1]`. An empty image counts as done.
    pub fn fraction(self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.painted as f64 / self.total as f64
    }

    /// Whole percent, rounded to nearest. Only a finished run reports 100.
    pub fn percent(self) -> u64 {
        if self.is_done() {
            return 100;
        }
        ((self.painted * 100 + self.total / 2) / self.total).min(99)
    }

    /// `true` when every pixel is covered.
    pub fn is_done(self) -> bool {
        self.painted >= self.total
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "printed {}/{} ({}%)",
            self.painted,
            self.total,
            self.percent()
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/cursor.rs"]
mod tests;
