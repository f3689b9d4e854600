//! Tick admission and autosave cadence.
//!
//! [`TickGate`] decides whether a host callback becomes a tick. Calls closer
//! together than the minimum interval are dropped, not queued. The elapsed
//! time handed to an admitted tick is measured from the previous admitted
//! tick, so dropped calls lose no simulated time.
//!
//! [`AutosaveTracker`] replaces a float-modulo test on the minute with a
//! monotonic bucket counter: it fires once each time the total in-game
//! minute count enters a new multiple of the interval.

use std::time::{Duration, Instant};

/// Debounces host callbacks into ticks.
#[derive(Debug, Clone)]
pub struct TickGate {
    min_interval: Duration,
    last_admitted: Option<Instant>,
}

impl TickGate {
    /// Create a gate admitting at most one tick per `min_interval`.
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_admitted: None,
        }
    }

    /// Offer a callback at `now`.
    ///
    /// Returns the elapsed time since the last admitted tick if this call is
    /// admitted. The first call after construction or [`reset`] only arms
    /// the gate and returns `None`.
    ///
    /// [`reset`]: TickGate::reset
    pub fn admit(&mut self, now: Instant) -> Option<Duration> {
        let Some(last) = self.last_admitted else {
            self.last_admitted = Some(now);
            return None;
        };
        let elapsed = now.saturating_duration_since(last);
        if elapsed < self.min_interval {
            return None;
        }
        self.last_admitted = Some(now);
        Some(elapsed)
    }

    /// Disarm the gate so the next call only re-arms it.
    pub const fn reset(&mut self) {
        self.last_admitted = None;
    }

    /// Whether the gate has a reference instant.
    pub const fn is_armed(&self) -> bool {
        self.last_admitted.is_some()
    }
}

/// Fires once per crossed multiple of the autosave interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosaveTracker {
    interval_minutes: u64,
    last_bucket: u64,
}

impl AutosaveTracker {
    /// Start tracking from the current total in-game minute.
    ///
    /// An interval of 0 disables autosave.
    pub const fn new(interval_minutes: u64, total_minutes: u64) -> Self {
        let last_bucket = match total_minutes.checked_div(interval_minutes) {
            Some(bucket) => bucket,
            None => 0,
        };
        Self {
            interval_minutes,
            last_bucket,
        }
    }

    /// Report whether `total_minutes` entered a new bucket, and record it.
    pub const fn crossed(&mut self, total_minutes: u64) -> bool {
        let Some(bucket) = total_minutes.checked_div(self.interval_minutes) else {
            return false;
        };
        if bucket > self.last_bucket {
            self.last_bucket = bucket;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_only_arms() {
        let mut gate = TickGate::new(Duration::from_secs(1));
        let start = Instant::now();
        assert!(!gate.is_armed());
        assert_eq!(gate.admit(start), None);
        assert!(gate.is_armed());
    }

    #[test]
    fn sub_interval_calls_are_dropped_without_losing_time() {
        let mut gate = TickGate::new(Duration::from_secs(1));
        let start = Instant::now();
        gate.admit(start);
        assert_eq!(gate.admit(start + Duration::from_millis(400)), None);
        assert_eq!(gate.admit(start + Duration::from_millis(900)), None);
        assert_eq!(
            gate.admit(start + Duration::from_millis(1300)),
            Some(Duration::from_millis(1300))
        );
        assert_eq!(gate.admit(start + Duration::from_millis(1500)), None);
        assert_eq!(
            gate.admit(start + Duration::from_millis(2300)),
            Some(Duration::from_secs(1))
        );
    }

    #[test]
    fn reset_disarms() {
        let mut gate = TickGate::new(Duration::from_secs(1));
        let start = Instant::now();
        gate.admit(start);
        gate.reset();
        assert_eq!(gate.admit(start + Duration::from_secs(60)), None);
        assert_eq!(
            gate.admit(start + Duration::from_secs(61)),
            Some(Duration::from_secs(1))
        );
    }

    #[test]
    fn autosave_fires_once_per_bucket() {
        let mut tracker = AutosaveTracker::new(5, 480);
        assert!(!tracker.crossed(481));
        assert!(!tracker.crossed(484));
        assert!(tracker.crossed(485));
        assert!(!tracker.crossed(485));
        assert!(!tracker.crossed(489));
        // Jumping several buckets fires once.
        assert!(tracker.crossed(520));
        assert!(!tracker.crossed(521));
    }

    #[test]
    fn zero_interval_never_fires() {
        let mut tracker = AutosaveTracker::new(0, 0);
        assert!(!tracker.crossed(10_000));
    }
}
