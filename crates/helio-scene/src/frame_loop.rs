//! Frame clocks and the single-threaded frame loop.
//!
//! The orbit model evaluates absolute time, so the loop carries no
//! accumulator: each frame reads the clock once and hands the reading to the
//! frame callback. Time is measured in milliseconds, matching the units of the
//! configured angular speeds.

use std::time::Instant;

use tracing::warn;

use crate::SceneError;

/// Source of frame timestamps in milliseconds.
pub trait FrameClock {
    /// Current time. Called exactly once per frame.
    fn now_ms(&mut self) -> f64;
}

/// Wall-clock milliseconds since the clock was created.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for MonotonicClock {
    fn now_ms(&mut self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Deterministic clock: frame `n` is stamped `n * frame_ms`, starting at zero.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    frame_ms: f64,
    frame: u64,
}

impl FixedStepClock {
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidFrameInterval`] unless `frame_ms` is
    /// positive and finite.
    pub fn new(frame_ms: f64) -> Result<Self, SceneError> {
        if frame_ms.is_finite() && frame_ms > 0.0 {
            Ok(Self { frame_ms, frame: 0 })
        } else {
            Err(SceneError::InvalidFrameInterval(frame_ms))
        }
    }

    pub fn frame_ms(&self) -> f64 {
        self.frame_ms
    }
}

impl FrameClock for FixedStepClock {
    fn now_ms(&mut self) -> f64 {
        let now = self.frame as f64 * self.frame_ms;
        self.frame += 1;
        now
    }
}

/// Drives one callback per frame with a non-decreasing timestamp.
pub struct FrameLoop<C: FrameClock> {
    clock: C,
    last_time: f64,
    frame_count: u64,
}

impl<C: FrameClock> FrameLoop<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            last_time: 0.0,
            frame_count: 0,
        }
    }

    /// Runs one frame: reads the clock and calls `frame_fn(now_ms)` exactly once.
    ///
    /// A clock reading earlier than the previous frame is clamped to the
    /// previous timestamp so time never runs backwards.
    pub fn tick(&mut self, frame_fn: impl FnOnce(f64)) {
        let mut now = self.clock.now_ms();
        if now < self.last_time {
            warn!(
                "Clock went backwards by {:.3}ms, holding at {:.3}ms",
                self.last_time - now,
                self.last_time
            );
            now = self.last_time;
        }
        self.last_time = now;

        frame_fn(now);
        self.frame_count += 1;
    }

    /// Returns the total number of frames run.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Timestamp handed to the most recent frame.
    pub fn last_time_ms(&self) -> f64 {
        self.last_time
    }
}
