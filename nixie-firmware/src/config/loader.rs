//! Configuration persistence
//!
//! Loads the clock configuration from flash storage.
//! Falls back to defaults if flash is empty.

use defmt::*;

use nixie_core::config::{ClockConfig, CONFIG_VERSION};
use nixie_hal_rp2040::flash::{FlashError, FlashStorage, StorageKey};
// Import the FlashStorage trait to bring methods into scope
use nixie_hal_rp2040::FlashStorageTrait;

/// Maximum serialized config size (binary)
const MAX_CONFIG_SIZE: usize = 128;

/// Configuration persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Flash operation failed
    Flash(FlashError),
    /// Serialization failed
    Serialize,
    /// Deserialization failed
    Deserialize,
    /// Config version mismatch
    VersionMismatch,
}

impl From<FlashError> for ConfigError {
    fn from(e: FlashError) -> Self {
        ConfigError::Flash(e)
    }
}

/// Configuration persistence manager
pub struct ConfigPersistence<'d> {
    storage: FlashStorage<'d>,
}

impl<'d> ConfigPersistence<'d> {
    pub fn new(storage: FlashStorage<'d>) -> Self {
        Self { storage }
    }

    /// Consume this persistence manager and return the underlying storage
    pub fn into_storage(self) -> FlashStorage<'d> {
        self.storage
    }

    /// Load the configuration, or store and return the defaults
    ///
    /// A missing, stale or unreadable record is replaced so the next boot
    /// finds a current one.
    pub async fn load_or_default(&mut self) -> ClockConfig {
        match self.load().await {
            Ok(config) => return config,
            Err(ConfigError::Flash(FlashError::NotFound)) => {
                info!("No configuration in flash, using defaults");
            }
            Err(e) => {
                warn!("Invalid configuration in flash ({:?}), using defaults", e);
            }
        }

        let config = ClockConfig::default();
        if let Err(e) = self.save(&config).await {
            warn!("Failed to store default configuration: {:?}", e);
        }
        config
    }

    /// Load configuration from binary postcard format
    pub async fn load(&mut self) -> Result<ClockConfig, ConfigError> {
        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        let len = self
            .storage
            .read(StorageKey::ClockConfig, &mut buffer)
            .await?;

        debug!("Read {} bytes of binary config from flash", len);

        let config: ClockConfig =
            postcard::from_bytes(&buffer[..len]).map_err(|_| ConfigError::Deserialize)?;

        if config.version != CONFIG_VERSION {
            warn!(
                "Config version mismatch: found {}, expected {}",
                config.version, CONFIG_VERSION
            );
            return Err(ConfigError::VersionMismatch);
        }

        log_config_summary(&config);
        Ok(config)
    }

    /// Store configuration in binary postcard format
    pub async fn save(&mut self, config: &ClockConfig) -> Result<(), ConfigError> {
        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        let data =
            postcard::to_slice(config, &mut buffer).map_err(|_| ConfigError::Serialize)?;
        self.storage.write(StorageKey::ClockConfig, data).await?;
        debug!("Wrote {} bytes of binary config to flash", data.len());
        Ok(())
    }
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &ClockConfig) {
    info!("Configuration loaded successfully");
    debug!("  display cycle {} ms", config.display_cycle_ms);
    debug!("  effect {:?} at {} ms", config.effect, config.effect_speed_ms);
    debug!(
        "  anti-poison {} ({} ms/step)",
        config.anti_poison, config.anti_poison_step_ms
    );
    debug!(
        "  buttons: debounce {} ms, long press {} ms",
        config.debounce_ms, config.long_press_ms
    );
}
