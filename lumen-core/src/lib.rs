//! Board-agnostic core logic for the Lumen light-sensing firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - The non-volatile medium trait the persistence layer is written against
//! - The persisted calibration record and its fixed byte layout
//! - The calibration controller (state machine, validation, mapping)
//! - Deployment configuration (mapping mode, raw domain, default bounds)

#![no_std]
#![deny(unsafe_code)]

pub mod calibration;
pub mod config;
pub mod traits;

pub use calibration::{
    BoundsError, CalibrationBounds, CalibrationController, CalibrationState, CalibrationStore,
    PersistedCalibration,
};
pub use config::{DeploymentConfig, MappingMode};
pub use traits::NvBytes;
