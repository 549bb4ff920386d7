//! Operator console output
//!
//! Formats the operator-facing lines and queues them for the TX task.
//! All console text goes through here so the wording lives in one place.

use core::fmt::Write;

use lumen_core::calibration::BOUNDS_LIMIT;
use lumen_core::{DeploymentConfig, PersistedCalibration};

use crate::channels::{ConsoleLine, CONSOLE_CHANNEL};

/// Queue one formatted line for the TX task
async fn emit(args: core::fmt::Arguments<'_>) {
    let mut line = ConsoleLine::new();
    if line.write_fmt(args).is_ok() {
        CONSOLE_CHANNEL.send(line).await;
    }
}

/// Periodic sample line
pub async fn reading(raw: u16, mapped: i32) {
    emit(format_args!("LDR read = {}, {}%", raw, mapped)).await;
}

/// Boot warning when no stored calibration exists
pub async fn boot_warning(deployment: &DeploymentConfig) {
    emit(format_args!("[WARN] no stored calibration found")).await;
    emit(format_args!(
        "[WARN] using defaults: min = {}, max = {}",
        deployment.default_bounds.min, deployment.default_bounds.max
    ))
    .await;
}

pub async fn dialog_started() {
    emit(format_args!("[CONFIG] entering configuration mode")).await;
}

pub async fn prompt_min() {
    emit(format_args!("enter minimum value (0-{}):", BOUNDS_LIMIT)).await;
}

pub async fn prompt_max() {
    emit(format_args!("enter maximum value (0-{}):", BOUNDS_LIMIT)).await;
}

/// Echo a parsed dialog value back to the operator
pub async fn value_received(which: &str, value: i32) {
    emit(format_args!("{} received: {}", which, value)).await;
}

pub async fn config_saved() {
    emit(format_args!("[CONFIG] calibration saved")).await;
}

pub async fn config_invalid() {
    emit(format_args!("[ERROR] invalid values, try again")).await;
}

pub async fn dialog_ended() {
    emit(format_args!("[CONFIG] leaving configuration mode")).await;
}

pub async fn reset_started() {
    emit(format_args!("[RESET] erasing stored calibration...")).await;
}

pub async fn reset_done() {
    emit(format_args!("[RESET] calibration erased")).await;
}

pub async fn show_started() {
    emit(format_args!("[SHOW] reading stored calibration...")).await;
}

/// Report the store-side view of the calibration
pub async fn show(view: PersistedCalibration) {
    if !view.configured {
        emit(format_args!("[WARN] no stored calibration found")).await;
    }
    emit(format_args!("[SHOW] min = {}", view.bounds.min)).await;
    emit(format_args!("[SHOW] max = {}", view.bounds.max)).await;
}
