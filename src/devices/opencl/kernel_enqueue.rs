use core::{ffi::c_void, mem::size_of};

use min_cl::api::{enqueue_nd_range_kernel, set_kernel_arg};
use tracing::trace;

use crate::{Buffer, DeviceError, OpenCL, Result};

/// Converts `Self` to a *const c_void.
/// This enables taking `Buffer` and a number `T` as an argument to an OpenCL kernel.
/// # Example
/// ```
/// use vecadd::{OpenCL, Buffer, opencl::AsClCvoidPtr};
///
/// fn args(args: &[&dyn AsClCvoidPtr]) {
///     // ...
/// }
///
/// fn main() -> vecadd::Result<()> {
///     let device = OpenCL::new(0)?;
///
///     let buf = Buffer::<f64, _>::new(&device, 10)?;
///     let num = 4u64;
///     args(&[&num, &buf]);
///     Ok(())
/// }
/// ```
pub trait AsClCvoidPtr {
    fn as_cvoid_ptr(&self) -> *const c_void;

    #[inline]
    fn is_num(&self) -> bool {
        false
    }

    #[inline]
    fn ptr_size(&self) -> usize {
        size_of::<*const c_void>()
    }
}

impl<T> AsClCvoidPtr for Buffer<'_, T, OpenCL> {
    #[inline]
    fn as_cvoid_ptr(&self) -> *const c_void {
        self.data.ptr
    }
}

macro_rules! impl_as_cl_num {
    ($($t:ty),*) => {
        $(
            impl AsClCvoidPtr for $t {
                #[inline]
                fn as_cvoid_ptr(&self) -> *const c_void {
                    self as *const $t as *const c_void
                }

                #[inline]
                fn ptr_size(&self) -> usize {
                    size_of::<$t>()
                }

                #[inline]
                fn is_num(&self) -> bool {
                    true
                }
            }
        )*
    };
}

impl_as_cl_num!(i32, u32, i64, u64, f32, f64);

/// Number of dimensions of a global work size. Trailing zeros mark unused dimensions.
pub(crate) fn work_dim(gws: &[usize; 3]) -> Result<usize> {
    if gws[0] == 0 {
        Err(DeviceError::InvalidWorkSize.into())
    } else if gws[1] == 0 {
        Ok(1)
    } else if gws[2] == 0 {
        Ok(2)
    } else {
        Ok(3)
    }
}

/// Compiles `src` (once per device and source), binds `args` in order and launches the kernel.
/// Returns after the launch has completed.
pub fn enqueue_kernel(
    device: &OpenCL,
    src: &str,
    gws: [usize; 3],
    lws: Option<[usize; 3]>,
    args: &[&dyn AsClCvoidPtr],
) -> Result<()> {
    let wd = work_dim(&gws)?;

    let mut binding = device.kernel_cache.borrow_mut();
    let kernel = binding.kernel_cache(device, src)?;

    for (idx, arg) in args.iter().enumerate() {
        set_kernel_arg(
            &kernel,
            idx,
            arg.as_cvoid_ptr(),
            arg.ptr_size(),
            arg.is_num(),
        )?;
    }

    trace!(?gws, ?lws, args = args.len(), "enqueue OpenCL kernel");
    enqueue_nd_range_kernel(&device.queue(), &kernel, wd, &gws, lws.as_ref(), None)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{work_dim, AsClCvoidPtr};
    use crate::{Buffer, OpenCL};

    #[test]
    fn test_work_dim() -> crate::Result<()> {
        assert_eq!(work_dim(&[10, 0, 0])?, 1);
        assert_eq!(work_dim(&[10, 4, 0])?, 2);
        assert_eq!(work_dim(&[10, 4, 2])?, 3);
        assert!(work_dim(&[0, 0, 0]).is_err());
        Ok(())
    }

    #[test]
    fn test_as_cl_cvoid() -> crate::Result<()> {
        let x = 5f64;
        assert_eq!(x.as_cvoid_ptr(), &x as *const f64 as *const core::ffi::c_void);
        assert!(x.is_num());
        assert_eq!(x.ptr_size(), 8);

        let device = OpenCL::new(0)?;
        let buf = Buffer::<f64, _>::new(&device, 100)?;
        assert_eq!(buf.as_cvoid_ptr(), buf.data.ptr as *const core::ffi::c_void);
        assert!(!buf.is_num());
        Ok(())
    }

    #[test]
    fn test_kernel_launch() -> crate::Result<()> {
        let device = OpenCL::new(0)?;

        let src = "
            __kernel void scale(__global const float* lhs, __global float* out, const float factor) {
                size_t id = get_global_id(0);
                out[id] = lhs[id] * factor;
            }
        ";

        let lhs = Buffer::from_slice(&device, &[1f32, 3., 6., 4., 1., 4.])?;
        let out = Buffer::<f32, _>::new(&device, lhs.len())?;

        device.launch_kernel(src, [lhs.len(), 0, 0], None, &[&lhs, &out, &2f32])?;
        assert_eq!(out.read_to_vec()?, vec![2., 6., 12., 8., 2., 8.]);
        Ok(())
    }

    #[test]
    fn test_build_error_is_returned() -> crate::Result<()> {
        let device = OpenCL::new(0)?;
        let out = Buffer::<f32, _>::new(&device, 4)?;

        let res = device.launch_kernel(
            "__kernel void broken(__global float* out) { out[get_global_id(0)] = ; }",
            [4, 0, 0],
            None,
            &[&out],
        );
        assert!(res.is_err());
        Ok(())
    }
}
