use core::ops::Add;

use crate::{Buffer, Device, Result};

/// Elementwise addition of two buffers, executed by the device that owns them.
/// The device decides how the addition is dispatched; callers never see an index.
pub trait AddBuf<T>: Device {
    /// Returns a new buffer holding `lhs[i] + rhs[i]`.
    /// # Example
    #[cfg_attr(feature = "cpu", doc = "```")]
    #[cfg_attr(not(feature = "cpu"), doc = "```ignore")]
    /// use vecadd::{AddBuf, Buffer, CPU};
    ///
    /// let device = CPU::new();
    /// let lhs = Buffer::from_slice(&device, &[1., 2., 3.])?;
    /// let rhs = Buffer::from_slice(&device, &[3., 2., 1.])?;
    ///
    /// let out = device.add(&lhs, &rhs)?;
    /// assert_eq!(out.read_to_vec()?, vec![4.; 3]);
    /// # Ok::<(), vecadd::Error>(())
    /// ```
    fn add<'a>(&'a self, lhs: &Buffer<T, Self>, rhs: &Buffer<T, Self>)
        -> Result<Buffer<'a, T, Self>>;
}

impl<'a, T, D> Add for &Buffer<'a, T, D>
where
    D: AddBuf<T>,
{
    type Output = Result<Buffer<'a, T, D>>;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.device()?.add(self, rhs)
    }
}
