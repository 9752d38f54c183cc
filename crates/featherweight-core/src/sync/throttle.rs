//! Minimum spacing between sync attempts.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

const NEVER: i64 = i64::MIN;

/// Records the last sync attempt and rejects attempts that come too soon.
///
/// Check-and-record is a single compare-and-swap, so two callers racing for
/// the same window cannot both pass.
#[derive(Debug)]
pub struct ThrottleGate {
    min_interval_ms: i64,
    last_attempt_ms: AtomicI64,
}

impl ThrottleGate {
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval_ms: i64::try_from(min_interval.as_millis()).unwrap_or(i64::MAX),
            last_attempt_ms: AtomicI64::new(NEVER),
        }
    }

    /// Record an attempt at `now_ms` unless the previous one is too recent.
    ///
    /// Returns `false` when throttled; the recorded time is left unchanged.
    pub fn try_begin(&self, now_ms: i64) -> bool {
        let mut last = self.last_attempt_ms.load(Ordering::Acquire);
        loop {
            if last != NEVER && now_ms.saturating_sub(last) < self.min_interval_ms {
                return false;
            }
            match self.last_attempt_ms.compare_exchange_weak(
                last,
                now_ms,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(actual) => last = actual,
            }
        }
    }

    /// Millis of the last recorded attempt, if any
    pub fn last_attempt(&self) -> Option<i64> {
        let last = self.last_attempt_ms.load(Ordering::Acquire);
        (last != NEVER).then_some(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_attempt_always_passes() {
        let gate = ThrottleGate::new(Duration::from_secs(10));
        assert!(gate.try_begin(0));
        assert_eq!(gate.last_attempt(), Some(0));
    }

    #[test]
    fn attempts_inside_window_are_rejected() {
        let gate = ThrottleGate::new(Duration::from_secs(10));
        assert!(gate.try_begin(1_000));
        assert!(!gate.try_begin(5_000));
        assert!(!gate.try_begin(10_999));
        assert!(gate.try_begin(11_000));
        assert_eq!(gate.last_attempt(), Some(11_000));
    }

    #[test]
    fn zero_interval_never_throttles() {
        let gate = ThrottleGate::new(Duration::ZERO);
        assert!(gate.try_begin(5));
        assert!(gate.try_begin(5));
    }

    #[test]
    fn only_one_racing_thread_wins_the_window() {
        let gate = std::sync::Arc::new(ThrottleGate::new(Duration::from_secs(10)));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let gate = gate.clone();
                std::thread::spawn(move || gate.try_begin(42))
            })
            .collect();
        let winners = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|passed| *passed)
            .count();
        assert_eq!(winners, 1);
    }
}
