//! Display bus trait for the shift-register chain

use crate::display::Frame;

/// Latched serial link to the tube drivers
///
/// One call must shift all four bytes out and latch them together, so
/// the tubes never show a partially shifted frame.
pub trait DisplayBus {
    type Error;

    fn send_frame(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}
