//! Tube display: content buffer, shared state and multiplex driver
//!
//! Six tubes are wired as three anode groups of two. The main context
//! renders into a [`DisplayBuffer`], publishes it to a [`SharedDisplay`],
//! and the timer context drives [`MultiplexDriver::tick`] from there.

pub mod buffer;
pub mod effect;
pub mod multiplex;
pub mod shared;
pub mod transition;

pub use buffer::{DisplayBuffer, DotMask};
pub use effect::DisplayEffect;
pub use multiplex::{dark_frame, encode_frame, Frame, MultiplexDriver};
pub use shared::{GroupSnapshot, SharedDisplay};
pub use transition::TransitionTracker;

/// Number of tubes on the clock
pub const TUBE_COUNT: usize = 6;

/// Number of multiplexed anode groups
pub const ANODE_GROUPS: usize = TUBE_COUNT / 2;

/// Render steps spent on each anode group
pub const TICKS_PER_GROUP: u8 = 11;

/// Render steps per full cycle, including the trailing dark slot
pub const CYCLE_TICKS: u8 = TICKS_PER_GROUP * ANODE_GROUPS as u8 + 1;

/// Bytes shifted out per frame
pub const FRAME_LEN: usize = 4;
