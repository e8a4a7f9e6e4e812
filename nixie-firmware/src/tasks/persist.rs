//! Color persistence task
//!
//! Owns the flash storage after boot and writes task colors when the
//! UI reports a change.

use defmt::*;

use crate::channels::COLOR_SAVE;
use crate::config::ColorPersistence;

#[embassy_executor::task]
pub async fn persist_task(mut colors: ColorPersistence<'static>) {
    info!("Persist task started");

    loop {
        let (slot, color) = COLOR_SAVE.receive().await;

        info!(
            "Saving color for slot {}: #{:02x}{:02x}{:02x}",
            slot, color.red, color.green, color.blue
        );

        match colors.save_color(slot, color).await {
            Ok(()) => {
                debug!("Color saved");
            }
            Err(e) => {
                error!("Failed to save color: {:?}", e);
            }
        }
    }
}
