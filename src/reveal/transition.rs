// Per-card transitions - opacity fades the host plays for every card

use crate::config::CardCell;
use crate::grid::Delay;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EasingType {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
}

impl EasingType {
    /// Apply easing function to animation progress
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            EasingType::EaseIn => t * t * t,
            EasingType::EaseOut => {
                let u = 1.0 - t;
                1.0 - (u * u * u)
            }
            EasingType::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 1.0 - t;
                    1.0 - 4.0 * u * u * u
                }
            }
        }
    }
}

/// One card's scheduled fade, as handed to the rendering host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellTransition {
    /// Playback index (position in delay order)
    pub index: usize,
    pub cell: CardCell,
    /// Computed delay, `None` when the card never shows
    pub delay: Option<f64>,
    pub target_opacity: f64,
    pub start_delay: f64,
    pub duration: f64,
    pub easing: EasingType,
}

impl CellTransition {
    pub fn new(index: usize, cell: CardCell, delay: Delay, hidden: bool, duration: f64) -> Self {
        let hidden = hidden || delay.is_infinite();
        Self {
            index,
            cell,
            delay: delay.seconds(),
            target_opacity: if hidden { 0.0 } else { 1.0 },
            start_delay: if hidden { 0.0 } else { delay.seconds().unwrap_or(0.0) },
            duration,
            easing: EasingType::EaseOut,
        }
    }

    /// Seconds after playback start at which this transition ends
    pub fn finish_time(&self) -> f64 {
        self.start_delay + self.duration
    }

    pub fn is_finished_at(&self, elapsed: f64) -> bool {
        elapsed >= self.finish_time()
    }

    /// Opacity `elapsed` seconds after playback start. Cards fade from 0.
    pub fn opacity_at(&self, elapsed: f64) -> f64 {
        if elapsed <= self.start_delay {
            return 0.0;
        }
        if self.duration <= 0.0 || self.is_finished_at(elapsed) {
            return self.target_opacity;
        }
        let progress = (elapsed - self.start_delay) / self.duration;
        self.target_opacity * self.easing.apply(progress)
    }
}
