//! Operator Console Protocol
//!
//! This crate defines the line-oriented text protocol spoken on the serial
//! console: one command word per line, case-insensitive, `\r` tolerated,
//! surrounding whitespace ignored.
//!
//! | Input line     | Meaning                                     |
//! |----------------|---------------------------------------------|
//! | `CONFIG`       | start the two-prompt calibration dialog     |
//! | `RESET`        | drop the stored calibration                 |
//! | `SHOW`         | print the persisted calibration             |
//! | anything else  | ignored                                     |
//!
//! During the calibration dialog the next two lines are numeric fields,
//! parsed with [`parse_decimal`].

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod line;

pub use command::{parse_decimal, Command};
pub use line::{Line, LineReader, MAX_LINE_LEN};
