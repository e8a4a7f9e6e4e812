//! SPI configuration for RP2040
//!
//! Maps the chip-neutral [`SpiConfig`] onto `embassy_rp::spi::Config`.

use embassy_rp::spi::{Config, Phase as RpPhase, Polarity as RpPolarity};

pub use nixie_hal::spi::{BitOrder, Mode, Phase, Polarity, SpiConfig};

/// The requested configuration cannot be expressed on this chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiConfigError {
    /// The RP2040 SPI block only shifts MSB first
    UnsupportedBitOrder,
}

/// Convert a chip-neutral SPI config into an embassy-rp one
pub fn to_rp_config(config: &SpiConfig) -> Result<Config, SpiConfigError> {
    if config.bit_order != BitOrder::MsbFirst {
        return Err(SpiConfigError::UnsupportedBitOrder);
    }

    let mut rp = Config::default();
    rp.frequency = config.frequency;
    rp.polarity = match config.polarity() {
        Polarity::IdleLow => RpPolarity::IdleLow,
        Polarity::IdleHigh => RpPolarity::IdleHigh,
    };
    rp.phase = match config.phase() {
        Phase::CaptureOnFirstTransition => RpPhase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => RpPhase::CaptureOnSecondTransition,
    };
    Ok(rp)
}
