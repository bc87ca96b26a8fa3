//! Register access capability.

use core::ptr::{read_volatile, write_volatile};

/// Word-wide access to memory-mapped peripheral registers.
///
/// Every call is a hardware access with side effects. Implementations must
/// not merge, reorder or drop accesses.
pub trait RegisterBank {
    fn read32(&self, addr: u32) -> u32;
    fn write32(&self, addr: u32, value: u32);

    /// Read-modify-write. Not atomic; only for registers no other agent
    /// writes, such as a pin's output-enable during init.
    fn modify32<F>(&self, addr: u32, f: F)
    where
        F: FnOnce(u32) -> u32,
    {
        let value = self.read32(addr);
        self.write32(addr, f(value));
    }
}

impl<B: RegisterBank + ?Sized> RegisterBank for &B {
    fn read32(&self, addr: u32) -> u32 {
        (**self).read32(addr)
    }

    fn write32(&self, addr: u32, value: u32) {
        (**self).write32(addr, value)
    }
}

/// Physical register file of the running chip.
#[derive(Debug)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// # Safety
    /// The caller must be running on an AM335x with the MMU off (physical
    /// addressing) and must not hand out a second `Mmio` to another context.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterBank for Mmio {
    fn read32(&self, addr: u32) -> u32 {
        // SAFETY: `Mmio::new` guarantees physical addressing; callers only
        // pass addresses from `soc`.
        unsafe { read_volatile(addr as usize as *const u32) }
    }

    fn write32(&self, addr: u32, value: u32) {
        // SAFETY: see `read32`.
        unsafe { write_volatile(addr as usize as *mut u32, value) }
    }
}
