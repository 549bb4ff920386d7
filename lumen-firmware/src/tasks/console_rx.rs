//! Console UART receive task
//!
//! Reassembles UART bytes into operator lines and hands them to the
//! control task.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use lumen_protocol::LineReader;

use crate::channels::LINE_CHANNEL;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Console RX task - feeds completed lines to the line channel
#[embassy_executor::task]
pub async fn console_rx_task(mut rx: BufferedUartRx<'static>) {
    info!("Console RX task started");

    let mut reader = LineReader::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        // Read available bytes
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    if let Some(line) = reader.feed(byte) {
                        LINE_CHANNEL.send(line).await;
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
