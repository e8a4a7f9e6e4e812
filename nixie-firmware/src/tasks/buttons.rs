//! Button polling task
//!
//! Samples the front panel every few milliseconds and forwards the
//! recognised gestures to the UI task.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant, Ticker};

use nixie_core::config::BUTTON_POLL_MS;
use nixie_drivers::button::ButtonPanel;

use crate::channels::BUTTON_CHANNEL;

#[embassy_executor::task]
pub async fn buttons_task(mut panel: ButtonPanel<Input<'static>>) {
    info!("Buttons task started");

    let mut ticker = Ticker::every(Duration::from_millis(BUTTON_POLL_MS));

    loop {
        ticker.next().await;

        for event in panel.poll(Instant::now().as_millis()) {
            debug!("Button: {:?}", event);
            // Send to button channel, dropping if full
            if BUTTON_CHANNEL.try_send(event).is_err() {
                warn!("Button channel full, dropping event");
            }
        }
    }
}
