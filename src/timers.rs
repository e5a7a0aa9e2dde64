//! Phase timing for a resolve run.

use std::time::{Duration, Instant};

use serde::Serialize;

/// Accumulates wall time into a slot when dropped, so early returns through `?`
/// still count the time spent before the failure.
pub(crate) struct PhaseTimer<'a> {
    start: Instant,
    slot: &'a mut Duration,
}

impl<'a> PhaseTimer<'a> {
    pub(crate) fn new(slot: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            slot,
        }
    }
}

impl Drop for PhaseTimer<'_> {
    fn drop(&mut self) {
        *self.slot += self.start.elapsed();
    }
}

/// Raw durations collected while a run is in progress.
#[derive(Debug, Default)]
pub(crate) struct PhaseDurations {
    pub merge: Duration,
    pub identities: Duration,
    pub resolve: Duration,
    pub finalize: Duration,
}

/// Where the time of one `resolve` call went. All times are in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvePhases {
    /// Parameter merge and validation.
    pub merge_ms: f64,
    /// Identifier and ARN assignment for every resource.
    pub identities_ms: f64,
    /// Intrinsic evaluation over the whole tree.
    pub resolve_ms: f64,
    /// Final pass filling identities still missing.
    pub finalize_ms: f64,
    pub total_ms: f64,
}

impl ResolvePhases {
    pub(crate) fn from_durations(durations: &PhaseDurations, total: Duration) -> Self {
        Self {
            merge_ms: millis(durations.merge),
            identities_ms: millis(durations.identities),
            resolve_ms: millis(durations.resolve),
            finalize_ms: millis(durations.finalize),
            total_ms: millis(total),
        }
    }

    /// Time not accounted for by any measured phase.
    pub fn overhead_ms(&self) -> f64 {
        self.total_ms - (self.merge_ms + self.identities_ms + self.resolve_ms + self.finalize_ms)
    }
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_phase_timer_records_on_early_return() {
        fn fails(slot: &mut Duration) -> Result<(), ()> {
            let _timer = PhaseTimer::new(slot);
            thread::sleep(Duration::from_millis(5));
            Err(())
        }

        let mut slot = Duration::ZERO;
        assert!(fails(&mut slot).is_err());
        assert!(slot >= Duration::from_millis(5));
    }

    #[test]
    fn test_phases_from_durations() {
        let durations = PhaseDurations {
            merge: Duration::from_millis(2),
            identities: Duration::from_millis(3),
            resolve: Duration::from_millis(4),
            finalize: Duration::from_millis(1),
        };
        let phases = ResolvePhases::from_durations(&durations, Duration::from_millis(12));
        assert_eq!(phases.merge_ms, 2.0);
        assert_eq!(phases.resolve_ms, 4.0);
        assert!((phases.overhead_ms() - 2.0).abs() < 1e-9);
    }
}
