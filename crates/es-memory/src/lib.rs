//! Guest memory for the espresso-emu Wii U CPU emulator
//!
//! A flat, big-endian guest address space shared by every emulated core.
//! Emulated cores are allowed to race on guest memory exactly like real
//! hardware threads would; the JIT verifier's global memory lock is the
//! only synchronisation point layered on top of this crate.

use std::cell::UnsafeCell;

use es_core::error::MemoryError;

/// Values that can be read from and written to guest memory with
/// big-endian byte order.
pub trait Primitive: Copy {
    const SIZE: u32;

    fn read_be(bytes: &[u8]) -> Self;
    fn write_be(self, bytes: &mut [u8]);
}

macro_rules! primitive_impl {
    ($($ty:ty),*) => {
        $(impl Primitive for $ty {
            const SIZE: u32 = std::mem::size_of::<$ty>() as u32;

            fn read_be(bytes: &[u8]) -> Self {
                <$ty>::from_be_bytes(bytes.try_into().expect("slice length checked by caller"))
            }

            fn write_be(self, bytes: &mut [u8]) {
                bytes.copy_from_slice(&self.to_be_bytes());
            }
        })*
    };
}

primitive_impl!(u8, u16, u32, u64);

/// Flat guest address space.
///
/// Reads and writes take `&self` so the memory can be shared across core
/// threads without locks on the hot path, mirroring hardware semantics.
pub struct Memory {
    data: UnsafeCell<Box<[u8]>>,
    size: u32,
}

// Safety: concurrent guest accesses are data races by design, exactly as
// they are on the physical console. Host-side invariants (bounds checks)
// never depend on the racing bytes.
unsafe impl Send for Memory {}
unsafe impl Sync for Memory {}

impl Memory {
    /// Allocate a zeroed guest address space of `size` bytes.
    pub fn new(size: u32) -> Self {
        Self {
            data: UnsafeCell::new(vec![0u8; size as usize].into_boxed_slice()),
            size,
        }
    }

    /// Size of the address space in bytes
    pub fn size(&self) -> u32 {
        self.size
    }

    fn check_range(&self, addr: u32, size: u32) -> Result<(), MemoryError> {
        if addr.checked_add(size).map_or(true, |end| end > self.size) {
            return Err(MemoryError::OutOfRange { addr, size });
        }
        Ok(())
    }

    /// Read a big-endian value from guest memory
    pub fn read<T: Primitive>(&self, addr: u32) -> Result<T, MemoryError> {
        self.check_range(addr, T::SIZE)?;
        let data = unsafe { &*self.data.get() };
        Ok(T::read_be(
            &data[addr as usize..(addr + T::SIZE) as usize],
        ))
    }

    /// Write a big-endian value to guest memory
    pub fn write<T: Primitive>(&self, addr: u32, value: T) -> Result<(), MemoryError> {
        self.check_range(addr, T::SIZE)?;
        let data = unsafe { &mut *self.data.get() };
        value.write_be(&mut data[addr as usize..(addr + T::SIZE) as usize]);
        Ok(())
    }

    /// Copy `buf.len()` bytes out of guest memory starting at `addr`
    pub fn read_into(&self, addr: u32, buf: &mut [u8]) -> Result<(), MemoryError> {
        self.check_range(addr, buf.len() as u32)?;
        let data = unsafe { &*self.data.get() };
        buf.copy_from_slice(&data[addr as usize..addr as usize + buf.len()]);
        Ok(())
    }

    /// Copy `buf` into guest memory starting at `addr`
    pub fn write_from(&self, addr: u32, buf: &[u8]) -> Result<(), MemoryError> {
        self.check_range(addr, buf.len() as u32)?;
        let data = unsafe { &mut *self.data.get() };
        data[addr as usize..addr as usize + buf.len()].copy_from_slice(buf);
        Ok(())
    }

    /// Zero a range of guest memory
    pub fn fill_zero(&self, addr: u32, size: u32) -> Result<(), MemoryError> {
        self.check_range(addr, size)?;
        let data = unsafe { &mut *self.data.get() };
        data[addr as usize..(addr + size) as usize].fill(0);
        Ok(())
    }
}
