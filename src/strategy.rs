//! The two ways of getting a device to add two vectors.

use core::{fmt, str::FromStr};

use crate::{AddBuf, Buffer, Device, DeviceError, Error, Result};

/// Local size used by [`KernelAdd::default`].
pub const DEFAULT_LOCAL_SIZE: usize = 64;

/// Adds two `f64` vectors that live on the device `D`.
pub trait VecAdd<D: Device> {
    fn add<'a>(&self, x: &Buffer<'a, f64, D>, y: &Buffer<'a, f64, D>)
        -> Result<Buffer<'a, f64, D>>;
}

/// Lets the array API dispatch the addition: `&x + &y`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LibraryAdd;

impl<D: AddBuf<f64>> VecAdd<D> for LibraryAdd {
    #[inline]
    fn add<'a>(
        &self,
        x: &Buffer<'a, f64, D>,
        y: &Buffer<'a, f64, D>,
    ) -> Result<Buffer<'a, f64, D>> {
        x + y
    }
}

/// Launches a hand-written, bounds-guarded kernel with one work-item per element.
///
/// The global size is rounded up to a multiple of `local_size`, see [`WorkSize`](crate::launch::WorkSize).
/// Implemented per device next to the device's other operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelAdd {
    pub local_size: Option<usize>,
}

impl KernelAdd {
    #[inline]
    pub fn new(local_size: Option<usize>) -> KernelAdd {
        KernelAdd { local_size }
    }
}

impl Default for KernelAdd {
    #[inline]
    fn default() -> Self {
        KernelAdd::new(Some(DEFAULT_LOCAL_SIZE))
    }
}

/// Selects one of the [`VecAdd`] implementations at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Library(LibraryAdd),
    Kernel(KernelAdd),
}

impl Default for Strategy {
    #[inline]
    fn default() -> Self {
        Strategy::Library(LibraryAdd)
    }
}

impl<D> VecAdd<D> for Strategy
where
    D: Device,
    LibraryAdd: VecAdd<D>,
    KernelAdd: VecAdd<D>,
{
    #[inline]
    fn add<'a>(
        &self,
        x: &Buffer<'a, f64, D>,
        y: &Buffer<'a, f64, D>,
    ) -> Result<Buffer<'a, f64, D>> {
        match self {
            Strategy::Library(library) => library.add(x, y),
            Strategy::Kernel(kernel) => kernel.add(x, y),
        }
    }
}

impl FromStr for Strategy {
    type Err = Error;

    /// Parses `library` or `kernel` (ASCII case-insensitive).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "library" | "lib" => Ok(Strategy::Library(LibraryAdd)),
            "kernel" => Ok(Strategy::Kernel(KernelAdd::default())),
            _ => Err(DeviceError::InvalidStrategy.into()),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Library(_) => write!(f, "library"),
            Strategy::Kernel(_) => write!(f, "kernel"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{KernelAdd, LibraryAdd, Strategy, DEFAULT_LOCAL_SIZE};
    use crate::{DeviceError, ErrorKind};

    #[test]
    fn test_parse_strategy() -> crate::Result<()> {
        assert_eq!("library".parse::<Strategy>()?, Strategy::Library(LibraryAdd));
        assert_eq!(
            " Kernel ".parse::<Strategy>()?,
            Strategy::Kernel(KernelAdd::new(Some(DEFAULT_LOCAL_SIZE)))
        );
        Ok(())
    }

    #[test]
    fn test_parse_unknown_strategy() {
        let err = "blas".parse::<Strategy>().unwrap_err();
        assert_eq!(err.kind(), Some(&DeviceError::InvalidStrategy));
    }

    #[test]
    fn test_display_roundtrips() -> crate::Result<()> {
        for strategy in [Strategy::default(), Strategy::Kernel(KernelAdd::default())] {
            assert_eq!(strategy.to_string().parse::<Strategy>()?, strategy);
        }
        Ok(())
    }

    #[cfg(feature = "cpu")]
    #[test]
    fn test_strategies_agree_on_cpu() -> crate::Result<()> {
        use crate::{host, Buffer, VecAdd, CPU};

        let device = CPU::new();
        let x = host::random_vector_seeded(1000, 7);
        let y = host::random_vector_seeded(1000, 8);

        let x_buf = Buffer::from_slice(&device, &x)?;
        let y_buf = Buffer::from_slice(&device, &y)?;

        let library = Strategy::default().add(&x_buf, &y_buf)?;
        let kernel = Strategy::Kernel(KernelAdd::new(Some(256))).add(&x_buf, &y_buf)?;

        assert_eq!(library.as_slice(), kernel.as_slice());
        assert_eq!(library.as_slice(), host::add(&x, &y).as_slice());
        Ok(())
    }
}
