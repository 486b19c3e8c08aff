//! The single-shot device vector addition.

use core::fmt;

use tracing::{debug, info, instrument};

use crate::{flag::AccessMode, host, Alloc, Buffer, Device, Read, Result, VecAdd};

/// Number of elements each run adds.
pub const N: usize = 100_000;

/// Outcome of one [`run_vec_add`].
#[derive(Debug, Clone, PartialEq)]
pub struct AddReport {
    /// The sum as computed by the device.
    pub result: Vec<f64>,
    /// Euclidean norm of `|result - (x + y)|`, where `x + y` is computed on the host.
    pub diff_norm: f64,
    /// Whether every element is within [`f64::EPSILON`] of the host sum.
    pub within_epsilon: bool,
}

impl AddReport {
    /// Compares the device `result` against the host sum of `x` and `y`.
    pub fn verify(result: Vec<f64>, x: &[f64], y: &[f64]) -> AddReport {
        let diff = host::abs_diff(&result, &host::add(x, y));
        let within_epsilon = host::within_epsilon(&result, x, y);

        AddReport {
            diff_norm: host::norm(&diff),
            within_epsilon,
            result,
        }
    }

    /// `true` if the device result is bit-exact to the host sum.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.diff_norm == 0.
    }
}

impl fmt::Display for AddReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|diff| = {:.16}", self.diff_norm)
    }
}

/// Copies `x` and `y` to `device`, adds them with `strategy`, reads the sum back and verifies it.
///
/// Every device allocation of the run is released before this returns, on success and on error.
/// # Example
#[cfg_attr(feature = "cpu", doc = "```")]
#[cfg_attr(not(feature = "cpu"), doc = "```ignore")]
/// use vecadd::{host, pipeline::run_vec_add, Strategy, CPU};
///
/// let device = CPU::new();
/// let x = host::random_vector(1000);
/// let y = host::random_vector(1000);
///
/// let report = run_vec_add(&device, &Strategy::default(), &x, &y)?;
/// assert_eq!(report.to_string(), "|diff| = 0.0000000000000000");
/// # Ok::<(), vecadd::Error>(())
/// ```
#[instrument(skip_all, fields(device = %device.name(), n = x.len()))]
pub fn run_vec_add<D, S>(device: &D, strategy: &S, x: &[f64], y: &[f64]) -> Result<AddReport>
where
    D: Alloc<f64> + Read<f64>,
    S: VecAdd<D>,
{
    let x_buf = Buffer::from_slice_with_mode(device, x, AccessMode::ReadOnly)?;
    let y_buf = Buffer::from_slice_with_mode(device, y, AccessMode::ReadOnly)?;
    debug!("copied inputs to the device");

    let z_buf = strategy.add(&x_buf, &y_buf)?;
    debug!("device addition finished");

    // blocks until the kernel's writes are visible
    let result = z_buf.read_to_vec()?;

    let report = AddReport::verify(result, x, y);
    info!(diff_norm = report.diff_norm, "verified device result");
    Ok(report)
}

/// Generates two random vectors of length `n` and passes them to [`run_vec_add`].
/// With a `seed`, the inputs are reproducible.
pub fn run_random<D, S>(device: &D, strategy: &S, n: usize, seed: Option<u64>) -> Result<AddReport>
where
    D: Alloc<f64> + Read<f64>,
    S: VecAdd<D>,
{
    let (x, y) = match seed {
        Some(seed) => (
            host::random_vector_seeded(n, seed),
            host::random_vector_seeded(n, seed.wrapping_add(1)),
        ),
        None => (host::random_vector(n), host::random_vector(n)),
    };
    run_vec_add(device, strategy, &x, &y)
}
