use crate::{flag::AccessMode, Buffer, Result};

/// This trait is implemented for every pointer type.
pub trait PtrType {
    /// Returns the element count.
    fn size(&self) -> usize;
    /// Returns the [`AccessMode`] the memory was allocated with.
    fn mode(&self) -> AccessMode;
}

/// A compute device owning the memory behind [`Buffer`]s.
pub trait Device: Sized {
    /// The pointer type a [`Buffer`] of this device wraps.
    type Data<T>: PtrType;

    /// A human readable name of the device, used in logs.
    fn name(&self) -> String;
}

pub trait Alloc<T>: Device {
    /// Allocate `len` elements on the device.
    /// The contents are unspecified until they are written.
    /// # Example
    #[cfg_attr(feature = "cpu", doc = "```")]
    #[cfg_attr(not(feature = "cpu"), doc = "```ignore")]
    /// use vecadd::{CPU, Alloc, PtrType, flag::AccessMode};
    ///
    /// let device = CPU::new();
    /// let data = Alloc::<f64>::alloc(&device, 12, AccessMode::WriteOnly)?;
    /// assert_eq!(data.size(), 12);
    /// # Ok::<(), vecadd::Error>(())
    /// ```
    fn alloc(&self, len: usize, mode: AccessMode) -> Result<Self::Data<T>>;

    /// Allocate new memory and populate it with `data`.
    fn alloc_from_slice(&self, data: &[T], mode: AccessMode) -> Result<Self::Data<T>>
    where
        T: Clone;
}

/// Trait for reading buffers back to the host.
pub trait Read<T>: Device {
    /// Copies the contents of `buf` into a new vector.
    /// Returns once the copy is complete.
    fn read_to_vec(&self, buf: &Buffer<T, Self>) -> Result<Vec<T>>;
}

/// Trait for writing host data to buffers.
pub trait WriteBuf<T>: Device {
    /// Write `data` to the buffer. `data` must have the length of the buffer.
    fn write(&self, buf: &mut Buffer<T, Self>, data: &[T]) -> Result<()>;
}
