//! Wall-clock time values
//!
//! The clock keeps time as milliseconds since the Unix epoch (UTC, no
//! leap seconds). These helpers convert between that and calendar fields.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const MS_PER_SECOND: u64 = 1_000;
pub const SECONDS_PER_DAY: u64 = 86_400;
pub const MS_PER_DAY: u64 = SECONDS_PER_DAY * MS_PER_SECOND;

/// Hour, minute and second of a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl TimeOfDay {
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    pub fn from_epoch_ms(ms: u64) -> Self {
        Self::from_seconds_of_day((ms / MS_PER_SECOND) % SECONDS_PER_DAY)
    }

    /// Split a second count (taken modulo one day)
    pub fn from_seconds_of_day(seconds: u64) -> Self {
        let seconds = seconds % SECONDS_PER_DAY;
        Self {
            hour: (seconds / 3_600) as u8,
            minute: (seconds / 60 % 60) as u8,
            second: (seconds % 60) as u8,
        }
    }

    pub fn seconds_of_day(&self) -> u64 {
        u64::from(self.hour) * 3_600 + u64::from(self.minute) * 60 + u64::from(self.second)
    }

    pub fn is_valid(&self) -> bool {
        self.hour < 24 && self.minute < 60 && self.second < 60
    }
}

/// Calendar date and time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub time: TimeOfDay,
}

impl DateTime {
    pub fn from_epoch_ms(ms: u64) -> Self {
        let days = (ms / MS_PER_DAY) as i64;
        let (year, month, day) = civil_from_days(days);
        Self {
            year,
            month,
            day,
            time: TimeOfDay::from_epoch_ms(ms),
        }
    }

    /// Milliseconds since the epoch; dates before 1970 clamp to zero
    pub fn to_epoch_ms(&self) -> u64 {
        let days = days_from_civil(self.year, self.month, self.day);
        if days < 0 {
            return 0;
        }
        (days as u64) * MS_PER_DAY + self.time.seconds_of_day() * MS_PER_SECOND
    }

    /// Day of week, 0 = Sunday
    pub fn weekday(&self) -> u8 {
        let days = days_from_civil(self.year, self.month, self.day);
        // 1970-01-01 was a Thursday
        (days + 4).rem_euclid(7) as u8
    }
}

/// Days since 1970-01-01 for a proleptic Gregorian date
pub fn days_from_civil(year: u16, month: u8, day: u8) -> i64 {
    let month = i64::from(month.clamp(1, 12));
    let y = i64::from(year) - i64::from(month <= 2);
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + i64::from(day.max(1)) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Proleptic Gregorian date for a day count since 1970-01-01
pub fn civil_from_days(days: i64) -> (u16, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year.clamp(0, i64::from(u16::MAX)) as u16, month, day)
}


#[cfg(test)]
mod tests {
    use super::mock::MockClock;
    use super::*;
    use crate::traits::TimeSource;

    #[test]
    fn test_epoch_origin() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(civil_from_days(0), (1970, 1, 1));
    }

    #[test]
    fn test_known_dates() {
        assert_eq!(days_from_civil(2000, 3, 1), 11_017);
        assert_eq!(civil_from_days(11_016), (2000, 2, 29));
        assert_eq!(civil_from_days(19_723), (2024, 1, 1));
    }

    #[test]
    fn test_time_of_day_split() {
        let ms = 1_700_000_000_000u64;
        let dt = DateTime::from_epoch_ms(ms);
        assert_eq!((dt.year, dt.month, dt.day), (2023, 11, 14));
        assert_eq!(dt.time, TimeOfDay::new(22, 13, 20));
        assert_eq!(dt.to_epoch_ms(), ms);
        assert_eq!(dt.weekday(), 2);
    }

    #[test]
    fn test_set_time_keeps_date() {
        let mut clock = MockClock::at((2024, 6, 30), TimeOfDay::new(23, 59, 59));
        let edited = TimeOfDay::new(7, 5, 3);
        clock.set_time_of_day(edited);

        let read_back = DateTime::from_epoch_ms(clock.now_ms());
        assert_eq!(read_back.time, edited);
        assert_eq!((read_back.year, read_back.month, read_back.day), (2024, 6, 30));
    }

    #[test]
    fn test_validity() {
        assert!(TimeOfDay::new(23, 59, 59).is_valid());
        assert!(!TimeOfDay::new(24, 0, 0).is_valid());
        assert!(!TimeOfDay::new(12, 60, 0).is_valid());
    }
}
