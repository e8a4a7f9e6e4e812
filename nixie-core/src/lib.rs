//! Board-agnostic core logic for the nixie clock firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (display bus, wall clock, backlight)
//! - Tube encoding and the multiplex display driver
//! - Display tasks and the ring scheduler that rotates them
//! - Edit-mode digit arithmetic
//! - Button gesture tracking and serial command parsing
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod config;
pub mod display;
pub mod input;
pub mod scheduler;
pub mod task;
pub mod time;
pub mod traits;
pub mod tube;
pub mod ui;
