//! Display multiplexing task
//!
//! Steps the multiplex driver once per render step. Runs on the
//! high-priority interrupt executor so UI work never stretches a step.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::{Duration, Ticker};

use nixie_core::config::DISPLAY_RENDER_STEP_US;
use nixie_core::display::MultiplexDriver;
use nixie_drivers::display::ShiftRegisterBus;

use crate::channels::SHARED_DISPLAY;

/// Driver over the blocking SPI0 shift-register chain
pub type DisplayDriver =
    MultiplexDriver<ShiftRegisterBus<Spi<'static, SPI0, Blocking>, Output<'static>>>;

/// Ticks between bus error reports (about 10 s)
const ERROR_REPORT_TICKS: u32 = 10_000_000 / DISPLAY_RENDER_STEP_US as u32;

#[embassy_executor::task]
pub async fn display_task(mut driver: DisplayDriver) {
    info!("Display task started");

    let mut ticker = Ticker::every(Duration::from_micros(DISPLAY_RENDER_STEP_US));
    let mut ticks: u32 = 0;
    let mut reported: u32 = 0;

    loop {
        ticker.next().await;
        driver.tick(&SHARED_DISPLAY);

        ticks = ticks.wrapping_add(1);
        if ticks % ERROR_REPORT_TICKS == 0 {
            let errors = driver.bus_errors();
            if errors != reported {
                warn!("Display bus errors: {}", errors);
                reported = errors;
            }
        }
    }
}
