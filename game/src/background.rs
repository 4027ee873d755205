use std::f64::consts::PI;
use std::time::Duration;

use engine::graphics::Color;
use serde::{Deserialize, Serialize};

pub const STATIC_BACKGROUND: Color = [10, 10, 14, 255];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundMode {
    #[default]
    Static,
    /// Fades smoothly through the hue wheel, one channel a third of a period behind the next.
    Cycle,
}

impl BackgroundMode {
    pub fn color_at(self, now: Duration) -> Color {
        match self {
            BackgroundMode::Static => STATIC_BACKGROUND,
            BackgroundMode::Cycle => cycle_color(now.as_secs_f64()),
        }
    }
}

pub fn cycle_color(seconds: f64) -> Color {
    let channel = |phase: f64| {
        let v = 0.5 + 0.5 * (seconds + phase).sin();
        (v * 255.0).round().clamp(0.0, 255.0) as u8
    };
    [channel(0.0), channel(PI * 2.0 / 3.0), channel(PI * 4.0 / 3.0), 255]
}
