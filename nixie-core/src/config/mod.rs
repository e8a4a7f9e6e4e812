//! Configuration types
//!
//! Compile-time hardware constants plus the runtime [`ClockConfig`],
//! which is stored in flash as postcard-serialized binary data.

pub mod clock;
pub mod color;

pub use clock::*;
pub use color::*;

/// Timer period of the multiplex driver
pub const DISPLAY_RENDER_STEP_US: u64 = 300;

/// Shift register clock rate
pub const DISPLAY_SPI_HZ: u32 = 4_000_000;

/// Period of the main UI loop
pub const UI_TICK_MS: u64 = 10;

/// Button sampling period
pub const BUTTON_POLL_MS: u64 = 10;

/// Maximum tasks in the display ring
pub const MAX_TASKS: usize = 8;

/// Longest accepted serial command line
pub const MAX_LINE_LEN: usize = 32;

/// Persisted color slot of the clock task
pub const CLOCK_COLOR_SLOT: u8 = 0;

/// Persisted color slot of the countdown task
pub const COUNTDOWN_COLOR_SLOT: u8 = 1;
