//! Converts elapsed time into a whole number of emissions

use crate::error::{EmitterError, Result};

/// Reject deltas that cannot advance a simulation.
pub(crate) fn check_delta(delta: f32) -> Result<()> {
    // NaN fails the comparison too
    if !(delta >= 0.0) {
        return Err(EmitterError::InvalidArgument("delta must be >= 0"));
    }
    if !delta.is_finite() {
        return Err(EmitterError::InvalidArgument("delta must be finite"));
    }
    Ok(())
}

/// Time accumulator for interval-throttled emission.
///
/// The remainder carries over between calls, so emission count tracks
/// elapsed time rather than frame count.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EmissionScheduler {
    accumulated: f32,
}

impl EmissionScheduler {
    pub const fn new() -> Self {
        Self { accumulated: 0.0 }
    }

    /// Seconds accrued since the last emission.
    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }

    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }

    /// Add `delta` seconds and return how many emissions fell due.
    ///
    /// An infinite (or NaN) interval never emits. A non-positive interval
    /// saturates to `u32::MAX`; callers cap that at their pool size.
    pub fn due_count(&mut self, delta: f32, interval: f32) -> Result<u32> {
        check_delta(delta)?;
        self.accumulated += delta;

        if interval.is_nan() || interval == f32::INFINITY {
            self.accumulated = 0.0;
            return Ok(0);
        }
        if interval <= 0.0 {
            self.accumulated = 0.0;
            return Ok(u32::MAX);
        }

        // CHANGE: libm::floorf, f32::floor lives in std
        // A quotient a few ULPs short of an integer counts as that integer,
        // so `delta == k * interval` emits k for decimal intervals too.
        let quotient = self.accumulated / interval;
        let due = libm::floorf(quotient + quotient * 4.0 * f32::EPSILON);
        self.accumulated = (self.accumulated - due * interval).max(0.0);
        Ok(due as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_delta_is_invalid() {
        let mut s = EmissionScheduler::new();
        let err = s.due_count(-1.0, 0.1).unwrap_err();
        assert_eq!(err, EmitterError::InvalidArgument("delta must be >= 0"));
        assert_eq!(s.accumulated(), 0.0);
    }

    #[test]
    fn test_nan_and_infinite_delta_are_invalid() {
        let mut s = EmissionScheduler::new();
        assert!(s.due_count(f32::NAN, 0.1).unwrap_err().is_invalid_argument());
        assert!(s.due_count(f32::INFINITY, 0.1).unwrap_err().is_invalid_argument());
        assert_eq!(s.accumulated(), 0.0);
    }

    #[test]
    fn test_infinite_interval_never_emits() {
        let mut s = EmissionScheduler::new();
        for _ in 0..1000 {
            assert_eq!(s.due_count(1.0, f32::INFINITY).unwrap(), 0);
        }
        assert_eq!(s.accumulated(), 0.0);
    }

    #[test]
    fn test_exact_multiple_of_interval() {
        let mut s = EmissionScheduler::new();
        assert_eq!(s.due_count(1.0, 0.125).unwrap(), 8);
        assert_eq!(s.accumulated(), 0.0);
    }

    #[test]
    fn test_exact_multiple_of_decimal_interval() {
        for interval in [0.1f32, 0.02, 0.001, 0.05, 0.3, 0.01, 0.007] {
            for k in 1..200u32 {
                let mut s = EmissionScheduler::new();
                let due = s.due_count(k as f32 * interval, interval).unwrap();
                assert_eq!(due, k, "interval {interval}, k {k}");
                assert!(s.accumulated() < interval);
            }
        }
    }

    #[test]
    fn test_just_below_interval_does_not_emit() {
        let mut s = EmissionScheduler::new();
        assert_eq!(s.due_count(0.0199, 0.02).unwrap(), 0);
        assert_eq!(s.due_count(0.0002, 0.02).unwrap(), 1);
    }

    #[test]
    fn test_sixty_fps_at_one_millisecond() {
        let mut s = EmissionScheduler::new();
        assert_eq!(s.due_count(1.0 / 60.0, 0.001).unwrap(), 16);
    }

    #[test]
    fn test_delta_shorter_than_interval() {
        let mut s = EmissionScheduler::new();
        assert_eq!(s.due_count(1.0 / 60.0, 0.020).unwrap(), 0);
        assert!(s.accumulated() > 0.0);
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut s = EmissionScheduler::new();
        assert_eq!(s.due_count(0.375, 0.25).unwrap(), 1);
        assert_eq!(s.accumulated(), 0.125);
        assert_eq!(s.due_count(0.125, 0.25).unwrap(), 1);
        assert_eq!(s.accumulated(), 0.0);
    }

    #[test]
    fn test_irregular_frames_do_not_drift() {
        let mut s = EmissionScheduler::new();
        let frames = [0.25, 0.5, 0.125, 0.125, 1.0];
        let total: u32 = frames.iter().map(|&d| s.due_count(d, 0.125).unwrap()).sum();
        assert_eq!(total, 16);
    }

    #[test]
    fn test_zero_interval_saturates() {
        let mut s = EmissionScheduler::new();
        assert_eq!(s.due_count(0.1, 0.0).unwrap(), u32::MAX);
        assert_eq!(s.accumulated(), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut s = EmissionScheduler::new();
        s.due_count(0.1, 1.0).unwrap();
        s.reset();
        assert_eq!(s.accumulated(), 0.0);
    }
}
