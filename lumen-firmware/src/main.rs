//! Lumen - Calibrated Light Sensing Firmware
//!
//! Main firmware binary for RP2040-based boards. Reads an LDR divider on an
//! ADC pin, maps the raw reading through the stored calibration, and serves
//! the CONFIG / RESET / SHOW console on UART0.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, InterruptHandler as AdcInterruptHandler};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::Pull;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use lumen_core::DeploymentConfig;
use lumen_hal_rp2040::FlashNv;

mod channels;
mod console;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    ADC_IRQ_FIFO => AdcInterruptHandler;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Lumen firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Operator console on UART0 (GPIO0 TX / GPIO1 RX)
    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("Console UART initialized");

    // LDR divider on GPIO26 / ADC0
    let adc = Adc::new(p.ADC, Irqs, embassy_rp::adc::Config::default());
    let ldr = Channel::new_pin(p.PIN_26, Pull::None);

    info!("ADC initialized");

    // Calibration record in the last flash sector
    let nv = FlashNv::new(p.FLASH);

    info!("Flash storage initialized");

    let deployment = DeploymentConfig::PERCENT_12BIT;

    // Spawn tasks
    spawner.spawn(tasks::console_rx_task(rx)).unwrap();
    spawner.spawn(tasks::console_tx_task(tx)).unwrap();
    spawner
        .spawn(tasks::control_task(adc, ldr, nv, deployment))
        .unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
