use std::time::{Duration, Instant};

pub const DEFAULT_FRAME_BUDGET: Duration = Duration::from_millis(16);

/// Caps the frame rate by waiting out whatever is left of a fixed per-frame budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePacer {
    budget: Duration,
}

impl FramePacer {
    pub fn new(budget: Duration) -> Self {
        Self { budget }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Time still to wait after `work` was spent on the current frame.
    pub fn remaining(&self, work: Duration) -> Duration {
        self.budget.saturating_sub(work)
    }

    /// Earliest instant the next frame may start, given when this one started.
    pub fn next_deadline(&self, frame_start: Instant) -> Instant {
        frame_start + self.budget
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_BUDGET)
    }
}
