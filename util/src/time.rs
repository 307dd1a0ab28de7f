//! Time utilities and the clock capability
//!
//! Anything that needs to know the current time takes a [`Clock`] rather than
//! reading the wall clock directly, so that tests can drive time
//! deterministically.

use chrono::{self, Utc};

/// Number of nanoseconds in a second
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// A source of the current time.
///
/// Time is expressed as seconds since the Unix epoch, which matches the
/// timestamps carried on sensor data.
pub trait Clock {
    /// The current time in seconds since the Unix epoch.
    fn now_s(&self) -> f64;
}

/// A [`Clock`] backed by the system wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_s(&self) -> f64 {
        let now = Utc::now();
        now.timestamp() as f64
            + f64::from(now.timestamp_subsec_nanos()) / NANOS_PER_SECOND as f64
    }
}

/// Convert a duration into a number of seconds, or `None` if overflow
pub fn duration_to_seconds(duration: chrono::Duration) -> Option<f64> {
    duration
        .num_nanoseconds()
        .map(|ns| ns as f64 / NANOS_PER_SECOND as f64)
}
