//! The OpenCL backend, built on `min-cl`.

mod cl_device;
mod cl_ptr;
mod kernel_enqueue;
mod ops;

pub use cl_device::*;
pub use cl_ptr::*;
pub use kernel_enqueue::*;
pub use ops::ADD_VEC_KERNEL;

pub use min_cl::{api, CLDevice};

/// Reads the environment variable `VECADD_CL_DEVICE_IDX` and returns the value as a `usize`.
/// Falls back to the first device.
pub fn chosen_cl_idx() -> crate::Result<usize> {
    match std::env::var("VECADD_CL_DEVICE_IDX") {
        Ok(idx) => Ok(idx
            .trim()
            .parse()
            .map_err(|_| crate::DeviceError::InvalidDeviceIdx)?),
        Err(_) => Ok(0),
    }
}
