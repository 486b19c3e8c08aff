//! The host `CPU` device.

mod cpu_device;
mod cpu_ptr;
mod ops;

pub use cpu_device::*;
pub use cpu_ptr::*;
