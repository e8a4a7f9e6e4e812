//! Wall clock backed by the RP2040 RTC
//!
//! The RTC counts whole seconds. Milliseconds are filled in from the
//! embassy time driver, measured from the moment the current second
//! was first observed.

use core::cell::Cell;

use defmt::*;
use embassy_rp::peripherals::RTC;
use embassy_rp::rtc::{DateTime as RtcDateTime, DayOfWeek, Rtc};
use embassy_time::Instant;

use nixie_core::time::{DateTime, TimeOfDay, MS_PER_SECOND};
use nixie_core::traits::TimeSource;

/// Date the RTC starts from when it was not running at boot
const BOOT_DATE: (u16, u8, u8) = (2024, 1, 1);

pub struct RtcClock {
    rtc: Rtc<'static, RTC>,
    /// Epoch ms of the last second read from the RTC and when it was first seen
    last: Cell<Option<(u64, Instant)>>,
}

impl RtcClock {
    /// Wrap the RTC, starting it at midnight of the boot date if needed
    pub fn new(mut rtc: Rtc<'static, RTC>) -> Self {
        if !rtc.is_running() {
            let start = DateTime {
                year: BOOT_DATE.0,
                month: BOOT_DATE.1,
                day: BOOT_DATE.2,
                time: TimeOfDay::new(0, 0, 0),
            };
            if rtc.set_datetime(to_rtc(&start)).is_err() {
                warn!("RTC rejected boot date");
            }
        }
        Self {
            rtc,
            last: Cell::new(None),
        }
    }
}

impl TimeSource for RtcClock {
    fn now_ms(&self) -> u64 {
        let Ok(now) = self.rtc.now() else {
            // Keep counting from the last good second
            return self
                .last
                .get()
                .map_or(0, |(ms, at)| ms + at.elapsed().as_millis());
        };
        let second_ms = from_rtc(&now).to_epoch_ms();

        match self.last.get() {
            Some((ms, at)) if ms == second_ms => {
                ms + at.elapsed().as_millis().min(MS_PER_SECOND - 1)
            }
            _ => {
                self.last.set(Some((second_ms, Instant::now())));
                second_ms
            }
        }
    }

    fn set_time_of_day(&mut self, time: TimeOfDay) {
        let mut date = DateTime::from_epoch_ms(self.now_ms());
        date.time = time;
        match self.rtc.set_datetime(to_rtc(&date)) {
            Ok(()) => {
                info!("Time set to {:02}:{:02}:{:02}", time.hour, time.minute, time.second);
                self.last.set(Some((date.to_epoch_ms(), Instant::now())));
            }
            Err(_) => warn!("RTC rejected time"),
        }
    }
}

fn to_rtc(date: &DateTime) -> RtcDateTime {
    let day_of_week = match date.weekday() {
        0 => DayOfWeek::Sunday,
        1 => DayOfWeek::Monday,
        2 => DayOfWeek::Tuesday,
        3 => DayOfWeek::Wednesday,
        4 => DayOfWeek::Thursday,
        5 => DayOfWeek::Friday,
        _ => DayOfWeek::Saturday,
    };
    RtcDateTime {
        year: date.year,
        month: date.month,
        day: date.day,
        day_of_week,
        hour: date.time.hour,
        minute: date.time.minute,
        second: date.time.second,
    }
}

fn from_rtc(now: &RtcDateTime) -> DateTime {
    DateTime {
        year: now.year,
        month: now.month,
        day: now.day,
        time: TimeOfDay::new(now.hour, now.minute, now.second),
    }
}
