//! Per-step delay model.
//!
//! A fast drag leaves the loop with a short interval; every tick then relaxes
//! it back toward the configured default, so a fling decelerates instead of
//! snapping to the resting speed.

use crate::constants::{
    DECAY_COARSE_DIVISOR, DECAY_STEP_COARSE_MS, DECAY_STEP_FINE_MS, DRAG_SPEED_DAMPING,
    DRAG_SPEED_GAIN, DRAG_SPEED_SCALE, MIN_DRAG_DURATION_MS, MIN_INTERVAL_MS,
};

/// One decay step toward `default`. Never overshoots.
#[inline]
pub fn next_interval(default: u32, current: u32) -> u32 {
    let step = if (current as f64) < default as f64 / DECAY_COARSE_DIVISOR {
        DECAY_STEP_COARSE_MS
    } else {
        DECAY_STEP_FINE_MS
    };
    let next = current.saturating_add(step);
    if next < default {
        next
    } else {
        default
    }
}

/// Starting interval after a drag of `distance` pixels over `duration_ms`.
///
/// Fast drags map to short intervals, slow or short drags to intervals near
/// `default`. The result is always in `[MIN_INTERVAL_MS, default]` as long as
/// `default >= MIN_INTERVAL_MS`.
pub fn drag_interval(distance: f64, duration_ms: f64, default: u32) -> u32 {
    let duration = duration_ms.max(MIN_DRAG_DURATION_MS);
    let raw = (distance.abs() * DRAG_SPEED_GAIN / duration * DRAG_SPEED_SCALE * DRAG_SPEED_DAMPING)
        .round();
    let speed = if raw.is_finite() {
        raw.min(default as f64) as u32
    } else {
        default
    };
    (default - speed).max(MIN_INTERVAL_MS)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntervalController {
    default_ms: u32,
    current_ms: u32,
}

impl IntervalController {
    /// A default below the minimum is raised to the minimum.
    pub fn new(default_ms: u32) -> Self {
        let default_ms = default_ms.max(MIN_INTERVAL_MS);
        Self {
            default_ms,
            current_ms: default_ms,
        }
    }

    #[inline]
    pub fn default_ms(&self) -> u32 {
        self.default_ms
    }

    #[inline]
    pub fn current_ms(&self) -> u32 {
        self.current_ms
    }

    /// Apply one decay step and return the new interval.
    pub fn decay(&mut self) -> u32 {
        self.current_ms = next_interval(self.default_ms, self.current_ms);
        self.current_ms
    }

    /// Seed the interval from a finished drag gesture.
    pub fn set_from_drag(&mut self, distance: f64, duration_ms: f64) -> u32 {
        self.current_ms = drag_interval(distance, duration_ms, self.default_ms);
        self.current_ms
    }

    pub fn reset(&mut self) {
        self.current_ms = self.default_ms;
    }
}
