//! Nixie Clock Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction types that chip-specific HALs
//! implement, so the clock application code stays chip-neutral.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (nixie-firmware)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nixie-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  nixie-hal-   │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Contents
//!
//! - [`flash::FlashStorage`] - Persistent key-value storage
//! - [`spi::SpiConfig`] - Display bus setup (mode, bit order, clock)

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod spi;

// Re-export key types at crate root for convenience
pub use flash::{FlashError, FlashStorage, StorageKey};
pub use spi::{BitOrder, Mode, Phase, Polarity, SpiConfig};
