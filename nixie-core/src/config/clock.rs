//! Runtime clock settings

use crate::display::DisplayEffect;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Layout version of [`ClockConfig`]; bump when fields change
pub const CONFIG_VERSION: u8 = 1;

/// User-tunable behaviour of the clock
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockConfig {
    /// Config version
    pub version: u8,
    /// How long each task stays on screen before rotating (ms)
    pub display_cycle_ms: u32,
    /// Duration of a digit transition (ms)
    pub effect_speed_ms: u16,
    /// Time each anti-poison digit is shown (ms)
    pub anti_poison_step_ms: u16,
    /// Edit mode ends after this long without a button press (ms)
    pub edit_timeout_ms: u32,
    /// Minimum press length for a click (ms)
    pub debounce_ms: u16,
    /// Hold time before a long press starts (ms)
    pub long_press_ms: u16,
    /// How long a serial flash stays visible (ms)
    pub flash_duration_ms: u32,
    /// Blank the leading zero of the hour
    pub trim_hours: bool,
    /// Run the cathode anti-poison sequence
    pub anti_poison: bool,
    /// Effect selected at power on
    pub effect: DisplayEffect,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            display_cycle_ms: 10_000,
            effect_speed_ms: 500,
            anti_poison_step_ms: 60,
            edit_timeout_ms: 30_000,
            debounce_ms: 40,
            long_press_ms: 1_000,
            flash_duration_ms: 5_000,
            trim_hours: false,
            anti_poison: true,
            effect: DisplayEffect::None,
        }
    }
}
