//! Logical clock abstraction.
//!
//! Pool timestamps (`created_at`, `service_start`) and refund proration
//! only ever subtract ticks, so the engine takes time through a trait and
//! tests can drive it deterministically.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::core_types::Ticks;

pub trait Clock: Send + Sync {
    fn now_ticks(&self) -> Ticks;
}

/// Wall clock mapped to Unix seconds.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ticks(&self) -> Ticks {
        chrono::Utc::now().timestamp().max(0) as Ticks
    }
}

/// Hand-driven clock for tests and simulations.
#[derive(Debug, Default)]
pub struct ManualClock {
    ticks: AtomicU64,
}

impl ManualClock {
    pub fn new(start: Ticks) -> Self {
        Self {
            ticks: AtomicU64::new(start),
        }
    }

    pub fn set(&self, ticks: Ticks) {
        self.ticks.store(ticks, Ordering::SeqCst);
    }

    pub fn advance(&self, delta: Ticks) {
        self.ticks.fetch_add(delta, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ticks(&self) -> Ticks {
        self.ticks.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_set_and_advance() {
        let clock = ManualClock::new(100);
        assert_eq!(clock.now_ticks(), 100);

        clock.advance(50);
        assert_eq!(clock.now_ticks(), 150);

        clock.set(10);
        assert_eq!(clock.now_ticks(), 10);
    }

    #[test]
    fn test_system_clock_is_monotonic_enough() {
        let clock = SystemClock;
        let a = clock.now_ticks();
        let b = clock.now_ticks();
        assert!(b >= a);
    }
}
