//! Shift-register display bus
//!
//! The tube drivers sit behind a chain of four shift registers. Bytes
//! are clocked in over SPI while the latch enable pin is low and
//! transferred to the outputs on its rising edge.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use nixie_core::display::Frame;
use nixie_core::traits::DisplayBus;

/// Errors from either half of the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError<S, P> {
    Spi(S),
    Latch(P),
}

/// SPI shift-register chain with a latch enable pin
pub struct ShiftRegisterBus<SPI, LE> {
    spi: SPI,
    latch: LE,
}

impl<SPI, LE> ShiftRegisterBus<SPI, LE>
where
    SPI: SpiBus<u8>,
    LE: OutputPin,
{
    /// Create the bus; the latch pin should already idle high
    pub fn new(spi: SPI, latch: LE) -> Self {
        Self { spi, latch }
    }

    pub fn release(self) -> (SPI, LE) {
        (self.spi, self.latch)
    }
}

impl<SPI, LE> DisplayBus for ShiftRegisterBus<SPI, LE>
where
    SPI: SpiBus<u8>,
    LE: OutputPin,
{
    type Error = BusError<SPI::Error, LE::Error>;

    fn send_frame(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        self.latch.set_low().map_err(BusError::Latch)?;
        let shifted = self
            .spi
            .write(frame)
            .and_then(|()| self.spi.flush())
            .map_err(BusError::Spi);
        // Always end with the latch high, even after a failed transfer
        self.latch.set_high().map_err(BusError::Latch)?;
        shifted
    }
}
