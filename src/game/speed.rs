use std::time::Duration;

use super::config::GameConfig;

/// Derives the tick interval from the score
///
/// The interval only ever shrinks, in fixed steps, each time the score lands
/// on a multiple of `speedup_every`, and stops at `min_interval_ms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeedController {
    interval_ms: u64,
    initial_ms: u64,
    min_ms: u64,
    step_ms: u64,
    every: u32,
}

impl SpeedController {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            interval_ms: config.initial_interval_ms,
            initial_ms: config.initial_interval_ms,
            min_ms: config.min_interval_ms,
            step_ms: config.interval_step_ms,
            every: config.speedup_every,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Back to the starting speed
    pub fn reset(&mut self) {
        self.interval_ms = self.initial_ms;
    }

    /// Called after the score changed; returns the new interval if it moved
    pub fn on_score(&mut self, score: u32) -> Option<Duration> {
        if score == 0 || score % self.every != 0 || self.interval_ms <= self.min_ms {
            return None;
        }

        let next = self
            .interval_ms
            .saturating_sub(self.step_ms)
            .max(self.min_ms);
        if next == self.interval_ms {
            return None;
        }

        self.interval_ms = next;
        Some(self.interval())
    }
}
