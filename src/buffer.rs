use core::{
    fmt::Debug,
    ops::{Deref, DerefMut},
};

use crate::{flag::AccessMode, Alloc, Device, DeviceError, PtrType, Read, Result, WriteBuf};

/// The underlying non-growable array structure. A `Buffer` may be encapsulated in other structs.
/// By default, the `Buffer` is an `f64` array.
///
/// The memory is released when the `Buffer` is dropped, on every path out of the scope that owns it.
/// Because a `Buffer` borrows its device, it can never outlive it.
/// # Example
#[cfg_attr(feature = "cpu", doc = "```")]
#[cfg_attr(not(feature = "cpu"), doc = "```ignore")]
/// use vecadd::{Buffer, CPU};
///
/// fn buffer_f64_cpu(buf: &Buffer<f64, CPU>) {}
///
/// let device = CPU::new();
/// let buf = Buffer::from_slice(&device, &[0.5, 1.3, 3.2, 2.43])?;
///
/// buffer_f64_cpu(&buf);
/// # Ok::<(), vecadd::Error>(())
/// ```
pub struct Buffer<'a, T, D: Device> {
    /// the type of pointer
    pub data: D::Data<T>,
    /// A reference to the corresponding device. Mainly used for operations without a device parameter.
    pub device: Option<&'a D>,
}

impl<'a, T, D: Device> Buffer<'a, T, D> {
    /// Creates a zeroed (or uninitialized, depending on the device) `Buffer` with read-write access.
    /// # Example
    #[cfg_attr(feature = "cpu", doc = "```")]
    #[cfg_attr(not(feature = "cpu"), doc = "```ignore")]
    /// use vecadd::{Buffer, CPU};
    ///
    /// let device = CPU::new();
    /// let mut buf = Buffer::<f64, _>::new(&device, 6)?;
    ///
    /// buf.copy_from_slice(&[2., 4., 6., 8., 10., 12.]);
    /// assert_eq!(buf.as_slice(), &[2., 4., 6., 8., 10., 12.]);
    /// # Ok::<(), vecadd::Error>(())
    /// ```
    #[inline]
    pub fn new(device: &'a D, len: usize) -> Result<Buffer<'a, T, D>>
    where
        D: Alloc<T>,
    {
        Buffer::with_mode(device, len, AccessMode::ReadWrite)
    }

    /// Creates a `Buffer` of `len` elements whose memory is only accessible in the given [`AccessMode`].
    #[inline]
    pub fn with_mode(device: &'a D, len: usize, mode: AccessMode) -> Result<Buffer<'a, T, D>>
    where
        D: Alloc<T>,
    {
        Ok(Buffer {
            data: device.alloc(len, mode)?,
            device: Some(device),
        })
    }

    /// Copies `data` to a new read-write `Buffer`.
    #[inline]
    pub fn from_slice(device: &'a D, data: &[T]) -> Result<Buffer<'a, T, D>>
    where
        T: Clone,
        D: Alloc<T>,
    {
        Buffer::from_slice_with_mode(device, data, AccessMode::ReadWrite)
    }

    /// Copies `data` to a new `Buffer` with the given [`AccessMode`].
    #[inline]
    pub fn from_slice_with_mode(
        device: &'a D,
        data: &[T],
        mode: AccessMode,
    ) -> Result<Buffer<'a, T, D>>
    where
        T: Clone,
        D: Alloc<T>,
    {
        Ok(Buffer {
            data: device.alloc_from_slice(data, mode)?,
            device: Some(device),
        })
    }

    /// Returns the device of the `Buffer`.
    /// Fails with [`DeviceError::Uninitialized`] if the `Buffer` was built without one.
    #[inline]
    pub fn device(&self) -> Result<&'a D> {
        self.device.ok_or_else(|| DeviceError::Uninitialized.into())
    }

    /// Returns the number of elements contained in `Buffer`.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.size()
    }

    /// Returns `true` if `Buffer` is created without a slice.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the [`AccessMode`] of the underlying memory.
    #[inline]
    pub fn mode(&self) -> AccessMode {
        self.data.mode()
    }

    /// Reads the contents of the `Buffer` into a vector.
    /// This blocks until the transfer has completed.
    #[inline]
    pub fn read_to_vec(&self) -> Result<Vec<T>>
    where
        D: Read<T>,
    {
        self.device()?.read_to_vec(self)
    }

    /// Writes a slice to the `Buffer`.
    /// With a CPU buffer, the slice is just copied to the slice of the buffer.
    #[inline]
    pub fn write(&mut self, data: &[T]) -> Result<()>
    where
        D: WriteBuf<T>,
    {
        self.device()?.write(self, data)
    }

    /// Returns a slice of the data. Only available for host-accessible pointers.
    #[inline]
    pub fn as_slice(&self) -> &[T]
    where
        D::Data<T>: Deref<Target = [T]>,
    {
        &self.data
    }

    /// Returns a mutable slice of the data. Only available for host-accessible pointers.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T]
    where
        D::Data<T>: DerefMut<Target = [T]>,
    {
        &mut self.data
    }
}

impl<T, D> Deref for Buffer<'_, T, D>
where
    D: Device,
    D::Data<T>: Deref<Target = [T]>,
{
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T, D> DerefMut for Buffer<'_, T, D>
where
    D: Device,
    D::Data<T>: DerefMut<Target = [T]>,
{
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

impl<T, D> Debug for Buffer<'_, T, D>
where
    D: Device,
    D::Data<T>: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Buffer")
            .field("data", &self.data)
            .field("len", &self.len())
            .field("mode", &self.mode())
            .finish()
    }
}

#[cfg(feature = "cpu")]
#[cfg(test)]
mod tests {
    use crate::{flag::AccessMode, Buffer, DeviceError, ErrorKind, CPU};

    #[test]
    fn test_from_slice_len() -> crate::Result<()> {
        let device = CPU::new();
        let buf = Buffer::from_slice(&device, &[1., 2., 3.])?;
        assert_eq!(buf.len(), 3);
        assert!(!buf.is_empty());
        assert_eq!(buf.mode(), AccessMode::ReadWrite);
        Ok(())
    }

    #[test]
    fn test_read_to_vec() -> crate::Result<()> {
        let device = CPU::new();
        let buf = Buffer::from_slice_with_mode(&device, &[0.25, 4., -1.5], AccessMode::ReadOnly)?;
        assert_eq!(buf.read_to_vec()?, vec![0.25, 4., -1.5]);
        Ok(())
    }

    #[test]
    fn test_write() -> crate::Result<()> {
        let device = CPU::new();
        let mut buf = Buffer::<f64, _>::new(&device, 4)?;
        buf.write(&[9., 3., 2., -4.])?;
        assert_eq!(buf.as_slice(), &[9., 3., 2., -4.]);
        Ok(())
    }

    #[test]
    fn test_deviceless_buffer() -> crate::Result<()> {
        let device = CPU::new();
        let mut buf = Buffer::<f64, _>::new(&device, 2)?;
        buf.device = None;

        let err = buf.read_to_vec().unwrap_err();
        assert_eq!(err.kind(), Some(&DeviceError::Uninitialized));
        Ok(())
    }
}
