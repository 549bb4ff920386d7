//! Control task
//!
//! The single logical control flow of the firmware: sample the LDR, report
//! the mapped value, dispatch at most one operator command per iteration,
//! sleep. The CONFIG dialog suspends sampling until both values arrive -
//! an interactive calibration session owns the whole loop.

use defmt::*;
use embassy_rp::adc::{Adc, Async, Channel};
use embassy_time::{Duration, Ticker};

use lumen_core::{CalibrationController, CalibrationStore, DeploymentConfig};
use lumen_hal_rp2040::FlashNv;
use lumen_protocol::{parse_decimal, Command};

use crate::channels::LINE_CHANNEL;
use crate::console;

/// Sampling interval
const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Control task - boot load, sampling loop, command dispatch
#[embassy_executor::task]
pub async fn control_task(
    mut adc: Adc<'static, Async>,
    mut ldr: Channel<'static>,
    nv: FlashNv<'static>,
    deployment: DeploymentConfig,
) {
    info!("Control task started");

    let mut controller = CalibrationController::boot(CalibrationStore::new(nv), deployment);
    if controller.is_configured() {
        let bounds = controller.bounds();
        info!("Loaded calibration: min={}, max={}", bounds.min, bounds.max);
    } else {
        warn!("No stored calibration, using defaults");
        console::boot_warning(controller.deployment()).await;
    }

    let mut ticker = Ticker::every(SAMPLE_INTERVAL);

    loop {
        match adc.read(&mut ldr).await {
            Ok(raw) => {
                let mapped = controller.map_reading(raw);
                console::reading(raw, mapped).await;
            }
            Err(e) => {
                warn!("ADC read failed: {:?}", e);
            }
        }

        // At most one command per iteration; empty and unknown lines no-op
        if let Ok(line) = LINE_CHANNEL.try_receive() {
            match Command::parse(&line) {
                Some(Command::Config) => {
                    run_config_dialog(&mut controller).await;
                }
                Some(Command::Reset) => {
                    console::reset_started().await;
                    controller.reset();
                    console::reset_done().await;
                    info!("Calibration erased");
                }
                Some(Command::Show) => {
                    console::show_started().await;
                    let view = controller.persisted();
                    console::show(view).await;
                }
                None => {}
            }
        }

        ticker.next().await;
    }
}

/// Two-prompt calibration dialog
///
/// Awaits one operator line per prompt. Validation happens only after both
/// values are in; either both bounds commit together or neither does.
async fn run_config_dialog(controller: &mut CalibrationController<FlashNv<'static>>) {
    console::dialog_started().await;

    console::prompt_min().await;
    let min = parse_decimal(&LINE_CHANNEL.receive().await);
    console::value_received("minimum", min).await;

    console::prompt_max().await;
    let max = parse_decimal(&LINE_CHANNEL.receive().await);
    console::value_received("maximum", max).await;

    match controller.configure(min, max) {
        Ok(bounds) => {
            info!("Calibration saved: min={}, max={}", bounds.min, bounds.max);
            console::config_saved().await;
        }
        Err(e) => {
            warn!("Rejected calibration: {:?}", e);
            console::config_invalid().await;
        }
    }

    console::dialog_ended().await;
}
