//! UI task
//!
//! Owns the scheduler and the wall clock. Each pass handles at most one
//! button gesture or serial command, renders, and publishes the result
//! to the display task.

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_rp::pwm::PwmOutput;
use embassy_time::{Duration, Instant, Ticker};

use nixie_core::config::UI_TICK_MS;
use nixie_core::scheduler::Scheduler;
use nixie_core::traits::ColorOutput;
use nixie_drivers::backlight::RgbBacklight;

use crate::channels::{BUTTON_CHANNEL, COLOR_SAVE, SERIAL_CHANNEL, SHARED_DISPLAY};
use crate::clock::RtcClock;

/// Backlight on three PWM outputs
pub type Backlight = RgbBacklight<PwmOutput<'static>, PwmOutput<'static>, PwmOutput<'static>>;

#[embassy_executor::task]
pub async fn ui_task(mut scheduler: Scheduler, mut clock: RtcClock, mut backlight: Backlight) {
    info!("UI task started");

    let mut ticker = Ticker::every(Duration::from_millis(UI_TICK_MS));

    loop {
        let wake = select3(
            ticker.next(),
            BUTTON_CHANNEL.receive(),
            SERIAL_CHANNEL.receive(),
        )
        .await;
        let now_ms = Instant::now().as_millis();

        match wake {
            Either3::First(()) => {}
            Either3::Second(event) => {
                scheduler.handle_button(&mut clock, now_ms, event);
            }
            Either3::Third(command) => {
                if let Err(e) = scheduler.apply_command(&clock, now_ms, command) {
                    warn!("Serial command failed: {:?}", e);
                }
            }
        }

        scheduler.update(&mut clock, now_ms);
        scheduler.publish(&SHARED_DISPLAY);

        let color = scheduler.current_color();
        if backlight.color() != color {
            backlight.set_color(color);
        }

        while let Some((slot, color)) = scheduler.take_color_change() {
            if COLOR_SAVE.try_send((slot, color)).is_err() {
                // Queue full, retried on a later pass
                scheduler.mark_color_dirty(slot);
                break;
            }
        }
    }
}
