//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use nixie_core::config::Color;
use nixie_core::display::SharedDisplay;
use nixie_core::input::ButtonEvent;
use nixie_core::command::SerialCommand;

/// Channel capacity for button gestures
const BUTTON_CHANNEL_SIZE: usize = 8;

/// Channel capacity for parsed serial commands
const SERIAL_CHANNEL_SIZE: usize = 4;

/// Channel capacity for pending color writes
const COLOR_SAVE_SIZE: usize = 4;

/// Button gestures from the panel poller
pub static BUTTON_CHANNEL: Channel<CriticalSectionRawMutex, ButtonEvent, BUTTON_CHANNEL_SIZE> =
    Channel::new();

/// Commands received on the serial port
pub static SERIAL_CHANNEL: Channel<CriticalSectionRawMutex, SerialCommand, SERIAL_CHANNEL_SIZE> =
    Channel::new();

/// A task color changed and should be written to flash (slot, color)
pub static COLOR_SAVE: Channel<CriticalSectionRawMutex, (u8, Color), COLOR_SAVE_SIZE> =
    Channel::new();

/// Rendered tubes, read by the display interrupt task
pub static SHARED_DISPLAY: SharedDisplay = SharedDisplay::new();
