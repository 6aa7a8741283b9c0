//! Fixed-cadence frame limiter.

use std::time::{Duration, Instant};

/// Paces the frame loop at a target rate. The loop polls input for
/// `remaining()` and calls `tick()` once per frame.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame_duration: Duration,
    frame_start: Instant,
}

impl FrameClock {
    pub fn new(fps: u32, now: Instant) -> Self {
        Self {
            frame_duration: Duration::from_secs(1) / fps.max(1),
            frame_start: now,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Time left in the current frame (zero once it has run over).
    pub fn remaining(&self, now: Instant) -> Duration {
        (self.frame_start + self.frame_duration).saturating_duration_since(now)
    }

    /// Start the next frame. Returns the wall-clock time since the previous
    /// frame started.
    pub fn tick(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.frame_start);
        self.frame_start = now;
        elapsed
    }
}
