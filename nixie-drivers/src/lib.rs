//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in nixie-core on top of the embedded-hal 1.0 traits:
//!
//! - Display bus (shift-register chain with a latch pin)
//! - RGB backlight (three PWM channels)
//! - Front panel buttons (active-low inputs with gesture tracking)

#![no_std]
#![deny(unsafe_code)]

pub mod backlight;
pub mod button;
pub mod display;
