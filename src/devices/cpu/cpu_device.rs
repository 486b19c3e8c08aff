use tracing::trace;

use crate::{flag::AccessMode, launch::WorkSize, Alloc, Device, Result};

use super::CPUPtr;

/// A CPU is used to perform calculations on the host CPU.
/// To make new operations invocable, a trait providing new functions should be implemented for [CPU].
///
/// # Example
/// ```
/// use vecadd::{CPU, Buffer};
///
/// let device = CPU::new();
/// let a = Buffer::from_slice(&device, &[1., 2., 3.])?;
///
/// assert_eq!(a.read_to_vec()?, vec![1., 2., 3.]);
/// # Ok::<(), vecadd::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct CPU {}

impl CPU {
    #[must_use]
    pub fn new() -> CPU {
        CPU {}
    }

    /// Runs `kernel` once for every work-item of `work`, passing its global id.
    ///
    /// The work-items are executed one after another on the calling thread.
    /// Like on a device, the global size may exceed the problem size, so
    /// kernels have to bounds-check their id.
    /// # Example
    /// ```
    /// use vecadd::{CPU, launch::WorkSize};
    ///
    /// let device = CPU::new();
    /// let mut out = vec![0usize; 10];
    ///
    /// let work = WorkSize::new(out.len(), Some(4))?;
    /// device.launch_kernel(work, |gid| {
    ///     if gid < out.len() {
    ///         out[gid] = gid * 2;
    ///     }
    /// });
    /// assert_eq!(out[9], 18);
    /// # Ok::<(), vecadd::Error>(())
    /// ```
    pub fn launch_kernel(&self, work: WorkSize, mut kernel: impl FnMut(usize)) {
        trace!(global = work.global, local = ?work.local, "launching host kernel");
        for gid in 0..work.global {
            kernel(gid)
        }
    }
}

impl Device for CPU {
    type Data<T> = CPUPtr<T>;

    #[inline]
    fn name(&self) -> String {
        "CPU".into()
    }
}

impl<T: Default + Clone> Alloc<T> for CPU {
    #[inline]
    fn alloc(&self, len: usize, mode: AccessMode) -> Result<CPUPtr<T>> {
        Ok(CPUPtr::new(len, mode))
    }

    #[inline]
    fn alloc_from_slice(&self, data: &[T], mode: AccessMode) -> Result<CPUPtr<T>> {
        Ok(CPUPtr::from_vec(data.to_vec(), mode))
    }
}
