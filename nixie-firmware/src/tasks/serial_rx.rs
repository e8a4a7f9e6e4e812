//! Serial receive task
//!
//! Assembles lines from the UART and forwards parsed commands.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use nixie_core::command::LineAssembler;

use crate::channels::SERIAL_CHANNEL;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 32;

#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: BufferedUartRx) {
    info!("Serial RX task started");

    let mut assembler = LineAssembler::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match assembler.feed(byte) {
                        Some(Ok(command)) => {
                            debug!("Serial command: {:?}", command);
                            if SERIAL_CHANNEL.try_send(command).is_err() {
                                warn!("Serial channel full, dropping command");
                            }
                        }
                        Some(Err(e)) => {
                            warn!("Rejected serial line: {:?}", e);
                        }
                        None => {}
                    }
                }
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
