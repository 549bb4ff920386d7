//! RAM test doubles for the non-volatile medium

use core::cell::RefCell;

use crate::traits::NvBytes;

pub(crate) const TEST_CAPACITY: usize = 0x20;

/// Plain in-memory medium with a sync counter
pub(crate) struct RamNv {
    pub bytes: [u8; TEST_CAPACITY],
    pub syncs: usize,
}

impl RamNv {
    pub fn new() -> Self {
        Self {
            bytes: [0x00; TEST_CAPACITY],
            syncs: 0,
        }
    }

    /// Medium in the erased state of NOR flash
    pub fn erased() -> Self {
        Self {
            bytes: [0xFF; TEST_CAPACITY],
            syncs: 0,
        }
    }
}

impl NvBytes for RamNv {
    fn capacity(&self) -> usize {
        TEST_CAPACITY
    }

    fn read(&mut self, offset: usize, buf: &mut [u8]) {
        buf.copy_from_slice(&self.bytes[offset..offset + buf.len()]);
    }

    fn write(&mut self, offset: usize, bytes: &[u8]) {
        self.bytes[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    fn sync(&mut self) {
        self.syncs += 1;
    }
}

/// Handle to a medium the test body keeps shared access to
///
/// Lets a test mutate the store behind a controller's back, or re-boot a
/// second controller over the same medium.
#[derive(Clone, Copy)]
pub(crate) struct SharedNv<'a>(pub &'a RefCell<RamNv>);

impl NvBytes for SharedNv<'_> {
    fn capacity(&self) -> usize {
        TEST_CAPACITY
    }

    fn read(&mut self, offset: usize, buf: &mut [u8]) {
        self.0.borrow_mut().read(offset, buf);
    }

    fn write(&mut self, offset: usize, bytes: &[u8]) {
        self.0.borrow_mut().write(offset, bytes);
    }

    fn sync(&mut self) {
        self.0.borrow_mut().sync();
    }
}
