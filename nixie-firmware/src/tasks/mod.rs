//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.
//! The display task runs on the interrupt executor, the rest on the
//! thread executor.

pub mod buttons;
pub mod display;
pub mod persist;
pub mod serial_rx;
pub mod ui;

pub use buttons::buttons_task;
pub use display::display_task;
pub use persist::persist_task;
pub use serial_rx::serial_rx_task;
pub use ui::ui_task;
