//! Line accumulation from a byte stream
//!
//! The console arrives as raw UART bytes; `LineReader` reassembles them
//! into complete lines, one byte at a time.

use heapless::Vec;

/// Maximum accepted line length in bytes
pub const MAX_LINE_LEN: usize = 32;

/// A completed console line
pub type Line = heapless::String<MAX_LINE_LEN>;

/// State machine turning a byte stream into lines
///
/// A line completes on `\n`. Carriage returns are dropped, so both LF and
/// CRLF terminators work. Bytes past `MAX_LINE_LEN` are discarded while the
/// line still terminates at its newline; a line that is not valid UTF-8 is
/// discarded entirely.
#[derive(Debug, Clone, Default)]
pub struct LineReader {
    buffer: Vec<u8, MAX_LINE_LEN>,
}

impl LineReader {
    /// Create a new line reader
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Discard any partially accumulated line
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Feed a single byte
    ///
    /// Returns `Some(line)` when a newline completes a valid line; empty
    /// lines are reported too (the dispatcher treats them as no-ops).
    pub fn feed(&mut self, byte: u8) -> Option<Line> {
        match byte {
            b'\r' => None,
            b'\n' => {
                let line = core::str::from_utf8(&self.buffer).ok().and_then(|s| {
                    let mut line = Line::new();
                    line.push_str(s).ok().map(|_| line)
                });
                self.buffer.clear();
                line
            }
            _ => {
                // Overlong input: drop the excess, keep waiting for the newline
                let _ = self.buffer.push(byte);
                None
            }
        }
    }
}
