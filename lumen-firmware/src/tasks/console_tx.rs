//! Console UART transmit task
//!
//! Drains the outbound line channel and writes each line with a CRLF
//! terminator.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::CONSOLE_CHANNEL;

/// Console TX task - writes queued lines to the UART
#[embassy_executor::task]
pub async fn console_tx_task(mut tx: BufferedUartTx<'static>) {
    info!("Console TX task started");

    loop {
        let line = CONSOLE_CHANNEL.receive().await;

        if let Err(e) = tx.write_all(line.as_bytes()).await {
            warn!("UART write error: {:?}", e);
            continue;
        }
        if let Err(e) = tx.write_all(b"\r\n").await {
            warn!("UART write error: {:?}", e);
        }
    }
}
