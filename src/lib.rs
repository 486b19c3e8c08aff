//! Adds two `f64` vectors on an OpenCL device (or the host CPU) and verifies the result on the host.
//!
//! A device addition can be requested in two ways, see [`Strategy`]:
//!
//! - [`LibraryAdd`]: the operator `&x + &y` on device [`Buffer`]s. The device supplies
//!   the elementwise kernel through [`AddBuf`].
//! - [`KernelAdd`]: a hand-written kernel with one work-item per element, launched with a
//!   global size rounded up to the work-group size and guarded by `gid < n`.
//!
#![cfg_attr(feature = "cpu", doc = "```")]
#![cfg_attr(not(feature = "cpu"), doc = "```ignore")]
//! use vecadd::{host, Buffer, CPU};
//!
//! let device = CPU::new();
//!
//! let x = Buffer::from_slice(&device, &host::random_vector(8))?;
//! let y = Buffer::from_slice(&device, &host::random_vector(8))?;
//!
//! let z = (&x + &y)?;
//! assert_eq!(z.read_to_vec()?, host::add(&x, &y));
//! # Ok::<(), vecadd::Error>(())
//! ```
//!
//! The [`pipeline`] module wraps transfer, addition, read-back and verification into
//! a single call and the `vecadd` binary prints its report.

pub use buffer::*;
pub use device_traits::*;
pub use error::*;
pub use op_traits::*;
pub use strategy::*;

#[cfg(feature = "cpu")]
pub use devices::cpu::{self, CPU};

#[cfg(feature = "opencl")]
pub use devices::opencl::{self, OpenCL};

mod buffer;
mod device_traits;
mod error;
mod op_traits;
mod strategy;

pub mod config;
pub mod devices;
pub mod flag;
pub mod host;
pub mod launch;
pub mod pipeline;
