//! Time source used for deadline checks.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Monotonic time source.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-driven clock for tests. Optionally advances by a fixed step after every
/// `now()` call, which models reads that each take that long.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<Instant>,
    step: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::with_step(Duration::ZERO)
    }

    pub fn with_step(step: Duration) -> Self {
        Self {
            current: Mutex::new(Instant::now()),
            step,
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut cur = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *cur += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let mut cur = self.current.lock().unwrap_or_else(|e| e.into_inner());
        let now = *cur;
        *cur += self.step;
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_steps_after_each_read() {
        let clock = ManualClock::with_step(Duration::from_secs(2));
        let a = clock.now();
        let b = clock.now();
        assert_eq!(b - a, Duration::from_secs(2));
    }

    #[test]
    fn manual_clock_advance() {
        let clock = ManualClock::new();
        let a = clock.now();
        clock.advance(Duration::from_millis(1500));
        assert_eq!(clock.now() - a, Duration::from_millis(1500));
        assert_eq!(clock.now() - a, Duration::from_millis(1500));
    }

    #[test]
    fn system_clock_is_monotonic() {
        let a = SystemClock.now();
        let b = SystemClock.now();
        assert!(b >= a);
    }
}
