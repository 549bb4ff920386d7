//! Persisted calibration record
//!
//! The record occupies fixed offsets in the non-volatile medium:
//!
//! | Offset | Width | Field                          |
//! |--------|-------|--------------------------------|
//! | 0x00   | 1     | configured flag (0x01 = set)   |
//! | 0x01   | 2     | min, little-endian u16         |
//! | 0x05   | 2     | max, little-endian u16         |
//!
//! The store does no validation and no defaulting; both belong to the
//! controller.

use crate::calibration::CalibrationBounds;
use crate::traits::NvBytes;

/// Offset of the configured flag byte
pub const FLAG_OFFSET: usize = 0x00;
/// Offset of the stored minimum bound
pub const MIN_OFFSET: usize = 0x01;
/// Offset of the stored maximum bound
pub const MAX_OFFSET: usize = 0x05;
/// Total span of the record region
pub const RECORD_LEN: usize = MAX_OFFSET + 2;

/// Flag value marking the bounds as valid
const FLAG_CONFIGURED: u8 = 0x01;
/// Flag value written by an erase
const FLAG_CLEARED: u8 = 0x00;

/// Durable storage for the calibration record
///
/// Owns the byte layout above and is the only component permitted to touch
/// the non-volatile medium.
pub struct CalibrationStore<M: NvBytes> {
    medium: M,
}

impl<M: NvBytes> CalibrationStore<M> {
    /// Create a store over a medium
    ///
    /// The medium must be at least `RECORD_LEN` bytes; anything smaller is
    /// a build-time sizing error.
    pub fn new(medium: M) -> Self {
        debug_assert!(medium.capacity() >= RECORD_LEN);
        Self { medium }
    }

    /// Consume the store and return the underlying medium
    pub fn into_medium(self) -> M {
        self.medium
    }

    /// Read the persisted calibration, if any
    ///
    /// Returns `None` unless the flag byte is exactly 0x01. The bound bytes
    /// are not read in that case; they may be stale from a previous
    /// configuration or raw erased-medium fill (0xFF on NOR flash).
    pub fn load(&mut self) -> Option<CalibrationBounds> {
        let mut flag = [0u8; 1];
        self.medium.read(FLAG_OFFSET, &mut flag);
        if flag[0] != FLAG_CONFIGURED {
            return None;
        }

        let mut word = [0u8; 2];
        self.medium.read(MIN_OFFSET, &mut word);
        let min = u16::from_le_bytes(word);
        self.medium.read(MAX_OFFSET, &mut word);
        let max = u16::from_le_bytes(word);

        Some(CalibrationBounds::new(min, max))
    }

    /// Persist a validated bounds pair
    ///
    /// Both bounds are written before the flag; the flag is the last byte
    /// to change ahead of the sync, so a commit torn mid-write reads back
    /// as unconfigured rather than yielding stale bounds.
    pub fn save(&mut self, bounds: CalibrationBounds) {
        self.medium.write(MIN_OFFSET, &bounds.min.to_le_bytes());
        self.medium.write(MAX_OFFSET, &bounds.max.to_le_bytes());
        self.medium.write(FLAG_OFFSET, &[FLAG_CONFIGURED]);
        self.medium.sync();
    }

    /// Clear the configured flag
    ///
    /// The bound bytes are left untouched; `load` will ignore them.
    pub fn erase(&mut self) {
        self.medium.write(FLAG_OFFSET, &[FLAG_CLEARED]);
        self.medium.sync();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::testnv::RamNv;

    #[test]
    fn test_load_empty_medium() {
        let mut store = CalibrationStore::new(RamNv::new());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_load_erased_nor_medium() {
        // Fresh NOR flash reads 0xFF everywhere; that is still unconfigured
        let mut store = CalibrationStore::new(RamNv::erased());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut store = CalibrationStore::new(RamNv::new());

        for (min, max) in [(0u16, 1u16), (50, 200), (0, 4095), (4094, 4095)] {
            let bounds = CalibrationBounds::new(min, max);
            store.save(bounds);
            assert_eq!(store.load(), Some(bounds));
        }
    }

    #[test]
    fn test_record_byte_layout() {
        let mut store = CalibrationStore::new(RamNv::new());
        store.save(CalibrationBounds::new(0x0102, 0x0A0B));

        let medium = store.into_medium();
        assert_eq!(medium.bytes[FLAG_OFFSET], 0x01);
        assert_eq!(&medium.bytes[MIN_OFFSET..MIN_OFFSET + 2], &[0x02, 0x01]);
        assert_eq!(&medium.bytes[MAX_OFFSET..MAX_OFFSET + 2], &[0x0B, 0x0A]);
    }

    #[test]
    fn test_save_syncs_once() {
        let mut store = CalibrationStore::new(RamNv::new());
        store.save(CalibrationBounds::new(10, 20));
        assert_eq!(store.into_medium().syncs, 1);
    }

    #[test]
    fn test_erase_clears_flag_only() {
        let mut store = CalibrationStore::new(RamNv::new());
        store.save(CalibrationBounds::new(10, 20));
        store.erase();

        assert_eq!(store.load(), None);

        // Bound bytes are stale but ignored
        let medium = store.into_medium();
        assert_eq!(medium.bytes[FLAG_OFFSET], 0x00);
        assert_eq!(&medium.bytes[MIN_OFFSET..MIN_OFFSET + 2], &[10, 0]);
    }

    #[test]
    fn test_erase_is_idempotent() {
        let mut store = CalibrationStore::new(RamNv::new());
        store.erase();
        store.erase();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_load_ignores_garbage_when_unconfigured() {
        let mut medium = RamNv::new();
        medium.bytes[MIN_OFFSET] = 0xDE;
        medium.bytes[MAX_OFFSET] = 0xAD;

        let mut store = CalibrationStore::new(medium);
        assert_eq!(store.load(), None);
    }
}
