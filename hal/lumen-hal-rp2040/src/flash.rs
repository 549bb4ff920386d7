//! Flash-backed non-volatile byte store for RP2040
//!
//! The RP2040 has no EEPROM, so the calibration record lives in the last
//! erase sector of the 2MB flash part. The record region is shadowed in
//! RAM: reads and writes hit the shadow, `sync` erases the sector and
//! programs the shadow back.
//!
//! Implements the `NvBytes` trait from `lumen-core`.

use embassy_rp::flash::{Blocking, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;

use lumen_core::NvBytes;

/// Flash size of the target part
pub const FLASH_SIZE: usize = 2 * 1024 * 1024; // 2MB on Pico-class boards

/// One erase sector reserved for the record, at the top of flash
pub const NV_SECTOR_SIZE: usize = ERASE_SIZE;
pub const NV_PARTITION_START: usize = FLASH_SIZE - NV_SECTOR_SIZE;

/// Shadowed byte region exposed through `NvBytes`
pub const NV_REGION_LEN: usize = 0x100;

/// RAM-shadowed flash sector
///
/// Failure handling follows the medium's failure model: the region offsets
/// and alignment are compile-time constants, and a part whose flash cannot
/// be programmed cannot hold this firmware either, so program errors are
/// swallowed rather than surfaced through the calibration layer.
pub struct FlashNv<'d> {
    flash: Flash<'d, FLASH, Blocking, FLASH_SIZE>,
    shadow: [u8; NV_REGION_LEN],
}

impl<'d> FlashNv<'d> {
    /// Take ownership of the flash peripheral and load the shadow
    ///
    /// A failed read leaves the shadow zeroed, which loads as unconfigured.
    pub fn new(flash: Peri<'d, FLASH>) -> Self {
        let mut flash: Flash<'d, FLASH, Blocking, FLASH_SIZE> = Flash::new_blocking(flash);

        let mut shadow = [0u8; NV_REGION_LEN];
        let _ = flash.blocking_read(NV_PARTITION_START as u32, &mut shadow);

        Self { flash, shadow }
    }
}

impl NvBytes for FlashNv<'_> {
    fn capacity(&self) -> usize {
        NV_REGION_LEN
    }

    fn read(&mut self, offset: usize, buf: &mut [u8]) {
        buf.copy_from_slice(&self.shadow[offset..offset + buf.len()]);
    }

    fn write(&mut self, offset: usize, bytes: &[u8]) {
        self.shadow[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    fn sync(&mut self) {
        let start = NV_PARTITION_START as u32;

        // The sector must erase before it can be programmed; skip the
        // program if the erase did not go through.
        if self
            .flash
            .blocking_erase(start, start + NV_SECTOR_SIZE as u32)
            .is_err()
        {
            return;
        }

        let _ = self.flash.blocking_write(start, &self.shadow);
    }
}
