//! Work sizes for kernel launches.

use crate::{DeviceError, Result};

/// The number of work-items a kernel is launched with.
///
/// With a local size, the global size is the problem size rounded up to the next
/// multiple of it. The work-items past the problem size exist, so every kernel
/// launched with a `WorkSize` has to guard its element accesses with `id < n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkSize {
    /// The problem size.
    pub n: usize,
    /// Total number of work-items, `>= n`.
    pub global: usize,
    /// Work-group size. `None` lets the device decide.
    pub local: Option<usize>,
}

impl WorkSize {
    /// # Example
    /// ```
    /// use vecadd::launch::WorkSize;
    ///
    /// let work = WorkSize::new(100_000, Some(256))?;
    /// assert_eq!(work.global, 100_096);
    ///
    /// let work = WorkSize::new(100_000, None)?;
    /// assert_eq!(work.global, 100_000);
    /// # Ok::<(), vecadd::Error>(())
    /// ```
    pub fn new(n: usize, local: Option<usize>) -> Result<WorkSize> {
        if n == 0 || local == Some(0) {
            return Err(DeviceError::InvalidWorkSize.into());
        }

        let global = match local {
            Some(local) => n.div_ceil(local) * local,
            None => n,
        };

        Ok(WorkSize { n, global, local })
    }

    /// The global work size in the 3-dimensional form OpenCL takes.
    #[inline]
    pub fn gws(&self) -> [usize; 3] {
        [self.global, 0, 0]
    }

    #[inline]
    pub fn lws(&self) -> Option<[usize; 3]> {
        self.local.map(|local| [local, 0, 0])
    }

    /// Number of work-items that fall past the problem size.
    #[inline]
    pub fn overhang(&self) -> usize {
        self.global - self.n
    }
}
