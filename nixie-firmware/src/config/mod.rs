//! Settings persistence
//!
//! Loads the clock configuration and task colors from flash, falling
//! back to compiled-in defaults.

pub mod color;
pub mod loader;

pub use color::ColorPersistence;
pub use loader::{ConfigError, ConfigPersistence};
