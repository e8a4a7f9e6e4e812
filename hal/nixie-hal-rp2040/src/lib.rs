//! RP2040-specific HAL for the nixie clock firmware
//!
//! Provides RP2040 implementations of the shared `nixie-hal` types:
//!
//! - Flash storage driver (implements `nixie_hal::FlashStorage`)
//! - SPI configuration mapping for the display shift registers

#![no_std]

pub mod flash;
pub mod spi;

// Re-export shared traits from nixie-hal for convenience
pub use nixie_hal::{FlashStorage as FlashStorageTrait, StorageKey};
