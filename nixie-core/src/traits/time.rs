//! Wall-clock time source trait

use crate::time::TimeOfDay;

/// Authoritative wall clock (typically the RTC)
pub trait TimeSource {
    /// Current time in milliseconds since the Unix epoch
    fn now_ms(&self) -> u64;

    /// Replace the time of day, keeping the current date
    fn set_time_of_day(&mut self, time: TimeOfDay);
}
