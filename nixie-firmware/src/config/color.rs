//! Task color persistence
//!
//! Each task with a color slot keeps its backlight color in flash as
//! three raw RGB bytes.

use defmt::*;

use nixie_core::config::Color;
use nixie_hal_rp2040::flash::{FlashError, FlashStorage, StorageKey};
use nixie_hal_rp2040::FlashStorageTrait;

use super::ConfigError;

pub struct ColorPersistence<'d> {
    storage: FlashStorage<'d>,
}

impl<'d> ColorPersistence<'d> {
    pub fn new(storage: FlashStorage<'d>) -> Self {
        Self { storage }
    }

    pub async fn load_color(&mut self, slot: u8) -> Result<Color, ConfigError> {
        let key = StorageKey::task_color(slot).ok_or(FlashError::InvalidKey)?;
        let mut buffer = [0u8; 3];
        let len = self.storage.read(key, &mut buffer).await?;
        Color::from_bytes(&buffer[..len]).ok_or(ConfigError::Deserialize)
    }

    /// Load a slot's color, or `default` when none is stored
    pub async fn load_color_or(&mut self, slot: u8, default: Color) -> Color {
        match self.load_color(slot).await {
            Ok(color) => {
                debug!("Color slot {}: {:?}", slot, color);
                color
            }
            Err(ConfigError::Flash(FlashError::NotFound)) => default,
            Err(e) => {
                warn!("Invalid color in slot {} ({:?}), using default", slot, e);
                default
            }
        }
    }

    pub async fn save_color(&mut self, slot: u8, color: Color) -> Result<(), ConfigError> {
        let key = StorageKey::task_color(slot).ok_or(FlashError::InvalidKey)?;
        self.storage.write(key, &color.to_bytes()).await?;
        Ok(())
    }
}
