//! Single-shot timer capability used by the animation loop.

/// Schedules one deferred tick. The host calls [`crate::Viewer::tick`] when
/// a scheduled delay elapses.
pub trait Timer {
    type Handle;

    fn schedule(&mut self, delay_ms: u32) -> Self::Handle;

    /// Cancelling a handle that already fired or was already cancelled is a
    /// no-op.
    fn cancel(&mut self, handle: Self::Handle);
}

/// Deterministic timer for headless hosts and tests.
///
/// Nothing fires on its own: the host pops due ticks with
/// [`ManualTimer::fire`] and forwards each to the viewer.
#[derive(Debug, Default)]
pub struct ManualTimer {
    next_id: u64,
    pending: Vec<(u64, u32)>,
    scheduled: Vec<u32>,
    cancelled: usize,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the oldest pending tick and return its delay.
    pub fn fire(&mut self) -> Option<u32> {
        if self.pending.is_empty() {
            return None;
        }
        let (_, delay) = self.pending.remove(0);
        Some(delay)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Delay of the oldest pending tick.
    pub fn next_delay(&self) -> Option<u32> {
        self.pending.first().map(|(_, d)| *d)
    }

    /// Every delay ever scheduled, in order.
    pub fn history(&self) -> &[u32] {
        &self.scheduled
    }

    pub fn cancelled_count(&self) -> usize {
        self.cancelled
    }
}

impl Timer for ManualTimer {
    type Handle = u64;

    fn schedule(&mut self, delay_ms: u32) -> u64 {
        self.next_id += 1;
        self.pending.push((self.next_id, delay_ms));
        self.scheduled.push(delay_ms);
        self.next_id
    }

    fn cancel(&mut self, handle: u64) {
        let before = self.pending.len();
        self.pending.retain(|(id, _)| *id != handle);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_schedule_order() {
        let mut t = ManualTimer::new();
        t.schedule(30);
        t.schedule(10);
        assert_eq!(t.fire(), Some(30));
        assert_eq!(t.fire(), Some(10));
        assert_eq!(t.fire(), None);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut t = ManualTimer::new();
        let h = t.schedule(5);
        t.cancel(h);
        t.cancel(h);
        assert_eq!(t.pending_count(), 0);
        assert_eq!(t.cancelled_count(), 1);
    }
}
