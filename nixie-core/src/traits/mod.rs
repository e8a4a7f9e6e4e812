//! Hardware abstraction traits
//!
//! These traits define the interface between the clock logic and
//! hardware-specific implementations.

pub mod backlight;
pub mod display;
pub mod time;

pub use backlight::ColorOutput;
pub use display::DisplayBus;
pub use time::TimeSource;
