use std::time::Duration;

use crate::controller::{MoveOutcome, Playfield};
use crate::playtest::InputAction;

pub const DEFAULT_GRAVITY_INTERVAL: Duration = Duration::from_millis(500);

/// Playfield plus the gravity timer that drives it from frame ticks.
#[derive(Debug, Clone)]
pub struct GameState {
    pub playfield: Playfield,
    pub gravity_interval: Duration,
    pub gravity_elapsed: Duration,
}

impl GameState {
    pub fn new(playfield: Playfield) -> Self {
        Self::with_gravity(playfield, DEFAULT_GRAVITY_INTERVAL)
    }

    pub fn with_gravity(playfield: Playfield, gravity_interval: Duration) -> Self {
        Self {
            playfield,
            gravity_interval: gravity_interval.max(Duration::from_millis(1)),
            gravity_elapsed: Duration::ZERO,
        }
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    /// Advances the gravity timer by `dt`.
    ///
    /// Performs at most one gravity step per call, however long the frame was.
    pub fn tick(&mut self, dt: Duration) -> Option<MoveOutcome> {
        if self.playfield.is_topped_out() {
            return None;
        }

        self.gravity_elapsed = self.gravity_elapsed.saturating_add(dt);
        if self.gravity_elapsed < self.gravity_interval {
            return None;
        }

        // Carry the overshoot, but never a full interval, so a long stall can't queue up steps.
        self.gravity_elapsed = self
            .gravity_elapsed
            .saturating_sub(self.gravity_interval)
            .min(self.gravity_interval.saturating_sub(Duration::from_nanos(1)));
        Some(self.playfield.advance_with_gravity())
    }

    pub fn handle_input(&mut self, action: InputAction) -> Option<MoveOutcome> {
        match action {
            InputAction::Noop => None,
            InputAction::MoveLeft => Some(self.playfield.shift(-1)),
            InputAction::MoveRight => Some(self.playfield.shift(1)),
            InputAction::SoftDrop => Some(self.playfield.soft_drop()),
        }
    }
}
