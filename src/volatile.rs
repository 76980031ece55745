//! Cell types for memory-mapped registers, accessed only through volatile reads and writes.

use zerocopy::{FromBytes, Immutable};

/// An MMIO register which can only be read from.
#[derive(Debug, Default, FromBytes, Immutable)]
#[repr(transparent)]
pub struct ReadOnly<T: Copy>(pub T);

impl<T: Copy> ReadOnly<T> {
    /// Constructs a new instance for testing.
    pub const fn new(value: T) -> Self {
        Self(value)
    }
}

/// An MMIO register which can only be written to.
#[derive(Debug, Default, FromBytes, Immutable)]
#[repr(transparent)]
pub struct WriteOnly<T: Copy>(pub T);

/// An MMIO register which may be both read and written.
#[derive(Debug, Default, FromBytes, Immutable)]
#[repr(transparent)]
pub struct Volatile<T: Copy>(pub T);

impl<T: Copy> Volatile<T> {
    /// Constructs a new instance for testing.
    pub const fn new(value: T) -> Self {
        Self(value)
    }
}

/// A register which can be read with a volatile load.
pub trait VolatileReadable<T> {
    /// Performs a volatile read of the register.
    ///
    /// # Safety
    ///
    /// The pointer must be valid for reads and properly aligned.
    unsafe fn vread(self) -> T;
}

impl<T: Copy> VolatileReadable<T> for *const ReadOnly<T> {
    unsafe fn vread(self) -> T {
        self.read_volatile().0
    }
}

impl<T: Copy> VolatileReadable<T> for *const Volatile<T> {
    unsafe fn vread(self) -> T {
        self.read_volatile().0
    }
}

/// A register which can be written with a volatile store.
pub trait VolatileWritable<T> {
    /// Performs a volatile write of the register.
    ///
    /// # Safety
    ///
    /// The pointer must be valid for writes and properly aligned.
    unsafe fn vwrite(self, value: T);
}

impl<T: Copy> VolatileWritable<T> for *mut WriteOnly<T> {
    unsafe fn vwrite(self, value: T) {
        (self as *mut T).write_volatile(value)
    }
}

impl<T: Copy> VolatileWritable<T> for *mut Volatile<T> {
    unsafe fn vwrite(self, value: T) {
        (self as *mut T).write_volatile(value)
    }
}

/// Performs a volatile read from the given field of a `NonNull` pointer to a register block.
macro_rules! volread {
    ($nonnull:expr, $field:ident) => {
        $crate::volatile::VolatileReadable::vread(core::ptr::addr_of!((*$nonnull.as_ptr()).$field))
    };
}

/// Performs a volatile write to the given field of a `NonNull` pointer to a register block.
macro_rules! volwrite {
    ($nonnull:expr, $field:ident, $value:expr) => {
        $crate::volatile::VolatileWritable::vwrite(
            core::ptr::addr_of_mut!((*$nonnull.as_ptr()).$field),
            $value,
        )
    };
}

pub(crate) use volread;
pub(crate) use volwrite;
