//! RP2040-specific HAL for the Lumen firmware
//!
//! Provides the flash-backed implementation of the non-volatile medium the
//! calibration record is stored in.

#![no_std]

pub mod flash;

pub use flash::FlashNv;
