//! Display task scheduler
//!
//! Keeps the live tasks in a ring, decides which one owns the tubes,
//! and routes button presses and serial commands to it.

pub mod dispatch;
pub mod ring;

pub use dispatch::Scheduler;
pub use ring::{TaskId, TaskRing};

/// Scheduler errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerError {
    /// No free task slot
    Full,
    /// Id does not refer to a stored task
    InvalidTask,
    /// No task of the required kind is in the ring
    NoSuchTask,
}
