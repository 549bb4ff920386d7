//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy
//! tasks. Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use lumen_protocol::Line;

/// Channel capacity for operator lines
const LINE_CHANNEL_SIZE: usize = 4;

/// Channel capacity for outbound console lines
const CONSOLE_CHANNEL_SIZE: usize = 8;

/// One formatted line of console output
pub type ConsoleLine = heapless::String<64>;

/// Completed operator lines from the console RX task
pub static LINE_CHANNEL: Channel<CriticalSectionRawMutex, Line, LINE_CHANNEL_SIZE> = Channel::new();

/// Outbound lines for the console TX task
pub static CONSOLE_CHANNEL: Channel<CriticalSectionRawMutex, ConsoleLine, CONSOLE_CHANNEL_SIZE> =
    Channel::new();
