use core::ops::{Deref, DerefMut};
use std::fmt::Debug;

use min_cl::api::{create_buffer, MemFlags};
use min_cl::CLDevice;
use tracing::{debug, info};

use super::{enqueue_kernel, AsClCvoidPtr, CLPtr};
use crate::{flag::AccessMode, Alloc, Device, Result};

/// Used to perform calculations with an OpenCL capable device.
/// To make new calculations invocable, a trait providing new operations should be implemented for [OpenCL].
/// # Example
/// ```
/// use vecadd::{OpenCL, Buffer};
///
/// fn main() -> vecadd::Result<()> {
///     let device = OpenCL::new(0)?;
///
///     let a = Buffer::from_slice(&device, &[1.3; 25])?;
///     assert_eq!(a.read_to_vec()?, vec![1.3; 5*5]);
///     Ok(())
/// }
/// ```
pub struct OpenCL {
    /// The underlying OpenCL device.
    pub device: CLDevice,
    device_idx: usize,
}

/// Short form for `OpenCL`
pub type CL = OpenCL;

impl Deref for OpenCL {
    type Target = CLDevice;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.device
    }
}

impl DerefMut for OpenCL {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.device
    }
}

impl OpenCL {
    /// Returns an [OpenCL] device at the specified device index.
    /// # Errors
    /// - No device was found at the given device index
    /// - some other OpenCL related errors
    pub fn new(device_idx: usize) -> Result<OpenCL> {
        let opencl = OpenCL {
            device: CLDevice::new(device_idx)?,
            device_idx,
        };
        info!(device_idx, device = ?opencl, "created OpenCL device");
        Ok(opencl)
    }

    #[inline]
    pub fn device_idx(&self) -> usize {
        self.device_idx
    }

    /// Executes a cached OpenCL kernel.
    /// The source is compiled on first use; build errors are returned unmodified.
    /// # Example
    ///
    /// ```
    /// use vecadd::{OpenCL, Buffer};
    ///
    /// fn main() -> vecadd::Result<()> {
    ///     let device = OpenCL::new(0)?;
    ///     let mut buf = Buffer::<f32, _>::new(&device, 10)?;
    ///
    ///     device.launch_kernel("
    ///      __kernel void add(__global float* buf, float num) {
    ///         int idx = get_global_id(0);
    ///         buf[idx] = num;
    ///      }
    ///     ", [buf.len(), 0, 0], None, &[&mut buf, &4f32])?;
    ///
    ///     assert_eq!(buf.read_to_vec()?, [4.0; 10]);
    ///
    ///     Ok(())
    /// }
    /// ```
    #[inline]
    pub fn launch_kernel(
        &self,
        src: &str,
        gws: [usize; 3],
        lws: Option<[usize; 3]>,
        args: &[&dyn AsClCvoidPtr],
    ) -> Result<()> {
        enqueue_kernel(self, src, gws, lws, args)
    }
}

impl Device for OpenCL {
    type Data<T> = CLPtr<T>;

    #[inline]
    fn name(&self) -> String {
        format!("OpenCL:{}", self.device_idx)
    }
}

impl Debug for OpenCL {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CLDevice {{
            name: {name:?},
            version: {version:?},
            max_mem_alloc_in_gb: {max_mem:?},
            unified_mem: {unified_mem},
        }}",
            name = self.device.name(),
            version = self.device.version(),
            unified_mem = self.device.unified_mem(),
            max_mem = self.device.max_mem_alloc_in_gb()
        )
    }
}

fn mem_flags(mode: AccessMode) -> u64 {
    match mode {
        AccessMode::ReadOnly => MemFlags::MemReadOnly as u64,
        AccessMode::WriteOnly => MemFlags::MemWriteOnly as u64,
        AccessMode::ReadWrite => MemFlags::MemReadWrite as u64,
    }
}

impl<T> Alloc<T> for OpenCL {
    fn alloc(&self, len: usize, mode: AccessMode) -> Result<CLPtr<T>> {
        let ptr = create_buffer::<T>(&self.ctx(), mem_flags(mode), len, None)?;
        debug!(len, ?mode, "allocated OpenCL buffer");

        Ok(unsafe { CLPtr::from_raw(ptr, len, mode) })
    }

    fn alloc_from_slice(&self, data: &[T], mode: AccessMode) -> Result<CLPtr<T>> {
        let ptr = create_buffer::<T>(
            &self.ctx(),
            mem_flags(mode) | MemFlags::MemCopyHostPtr as u64,
            data.len(),
            Some(data),
        )?;
        debug!(len = data.len(), ?mode, "copied host data to OpenCL buffer");

        Ok(unsafe { CLPtr::from_raw(ptr, data.len(), mode) })
    }
}

#[cfg(test)]
mod tests {
    use super::mem_flags;
    use crate::{flag::AccessMode, OpenCL, PtrType};
    use crate::{Alloc, Buffer};

    #[test]
    fn test_mem_flags() {
        assert_eq!(mem_flags(AccessMode::ReadWrite), 1);
        assert_eq!(mem_flags(AccessMode::WriteOnly), 1 << 1);
        assert_eq!(mem_flags(AccessMode::ReadOnly), 1 << 2);
    }

    #[test]
    fn test_alloc_modes() -> crate::Result<()> {
        let device = OpenCL::new(0)?;

        let ptr = Alloc::<f64>::alloc(&device, 100, AccessMode::WriteOnly)?;
        assert_eq!(ptr.size(), 100);
        assert!(!ptr.ptr.is_null());

        let buf = Buffer::from_slice_with_mode(&device, &[1., 2.], AccessMode::ReadOnly)?;
        assert_eq!(buf.mode(), AccessMode::ReadOnly);
        assert_eq!(buf.read_to_vec()?, vec![1., 2.]);
        Ok(())
    }
}
