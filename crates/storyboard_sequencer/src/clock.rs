// SPDX-License-Identifier: MIT OR Apache-2.0
//! Virtual time base for schedule construction.

use serde::{Deserialize, Serialize};

/// Error for a negative or non-finite duration
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("invalid duration: {0}")]
pub struct InvalidDurationError(pub f32);

/// Monotonic virtual clock used while building a schedule.
///
/// This is a logical clock, not a playback clock: it advances only when a
/// grouping or wait is committed, and has no wall-clock coupling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimelineClock {
    now: f32,
}

impl TimelineClock {
    /// Create a clock starting at time zero
    pub fn new() -> Self {
        Self { now: 0.0 }
    }

    /// Current virtual time in seconds
    pub fn now(&self) -> f32 {
        self.now
    }

    /// Commit elapsed time and return the new current time
    pub fn advance(&mut self, duration: f32) -> Result<f32, InvalidDurationError> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(InvalidDurationError(duration));
        }
        self.now += duration;
        Ok(self.now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_is_monotonic() {
        let mut clock = TimelineClock::new();
        assert_eq!(clock.now(), 0.0);
        assert_eq!(clock.advance(1.5).unwrap(), 1.5);
        assert_eq!(clock.advance(0.0).unwrap(), 1.5);
        assert_eq!(clock.advance(2.5).unwrap(), 4.0);
        assert_eq!(clock.now(), 4.0);
    }

    #[test]
    fn test_negative_duration_rejected() {
        let mut clock = TimelineClock::new();
        assert_eq!(clock.advance(-0.1), Err(InvalidDurationError(-0.1)));
        assert_eq!(clock.now(), 0.0);
    }

    #[test]
    fn test_non_finite_duration_rejected() {
        let mut clock = TimelineClock::new();
        assert!(clock.advance(f32::NAN).is_err());
        assert!(clock.advance(f32::INFINITY).is_err());
        assert_eq!(clock.now(), 0.0);
    }
}
