//! Run configuration read from the environment.
//!
//! | Variable | Values | Default |
//! |---|---|---|
//! | `VECADD_BACKEND` | `cpu`, `opencl` | `opencl` if compiled in, `cpu` otherwise |
//! | `VECADD_STRATEGY` | `library`, `kernel` | `library` |
//! | `VECADD_LOCAL_SIZE` | work-group size or `none` (kernel strategy only) | `64` |
//! | `VECADD_CL_DEVICE_IDX` | OpenCL device index | `0` |
//! | `VECADD_SEED` | `u64` seed for the input vectors | unseeded |

use core::{fmt, str::FromStr};

use crate::{pipeline::N, DeviceError, Error, KernelAdd, Result, Strategy};

/// The compute backend a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Cpu,
    OpenCL,
}

impl Default for Backend {
    #[inline]
    fn default() -> Self {
        if cfg!(feature = "opencl") {
            Backend::OpenCL
        } else {
            Backend::Cpu
        }
    }
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpu" | "host" => Ok(Backend::Cpu),
            "opencl" | "cl" => Ok(Backend::OpenCL),
            _ => Err(DeviceError::InvalidBackend.into()),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Cpu => write!(f, "cpu"),
            Backend::OpenCL => write!(f, "opencl"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Vector length. Always [`N`] when read from the environment.
    pub len: usize,
    pub backend: Backend,
    pub strategy: Strategy,
    pub cl_device_idx: usize,
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            len: N,
            backend: Backend::default(),
            strategy: Strategy::default(),
            cl_device_idx: 0,
            seed: None,
        }
    }
}

impl RunConfig {
    /// Reads the configuration from the process environment.
    #[inline]
    pub fn from_env() -> Result<RunConfig> {
        RunConfig::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<RunConfig> {
        let mut config = RunConfig::default();

        if let Some(backend) = lookup("VECADD_BACKEND") {
            config.backend = backend.parse()?;
        }

        if let Some(strategy) = lookup("VECADD_STRATEGY") {
            config.strategy = strategy.parse()?;
        }

        if let Some(local_size) = lookup("VECADD_LOCAL_SIZE") {
            if let Strategy::Kernel(_) = config.strategy {
                config.strategy = Strategy::Kernel(KernelAdd::new(parse_local_size(&local_size)?));
            }
        }

        if let Some(idx) = lookup("VECADD_CL_DEVICE_IDX") {
            config.cl_device_idx = idx
                .trim()
                .parse()
                .map_err(|_| DeviceError::InvalidDeviceIdx)?;
        }

        if let Some(seed) = lookup("VECADD_SEED") {
            config.seed = Some(seed.trim().parse()?);
        }

        Ok(config)
    }
}

fn parse_local_size(value: &str) -> Result<Option<usize>> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }

    match value.parse::<usize>() {
        Ok(0) | Err(_) => Err(DeviceError::InvalidWorkSize.into()),
        Ok(local) => Ok(Some(local)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{Backend, RunConfig};
    use crate::{pipeline::N, DeviceError, ErrorKind, KernelAdd, Strategy};

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() -> crate::Result<()> {
        let config = RunConfig::from_lookup(lookup(&[]))?;
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.len, N);
        assert_eq!(config.strategy, Strategy::default());
        assert_eq!(config.seed, None);
        Ok(())
    }

    #[test]
    fn test_all_vars() -> crate::Result<()> {
        let config = RunConfig::from_lookup(lookup(&[
            ("VECADD_BACKEND", "cpu"),
            ("VECADD_STRATEGY", "kernel"),
            ("VECADD_LOCAL_SIZE", "256"),
            ("VECADD_CL_DEVICE_IDX", "1"),
            ("VECADD_SEED", "20181205"),
        ]))?;

        assert_eq!(config.backend, Backend::Cpu);
        assert_eq!(config.strategy, Strategy::Kernel(KernelAdd::new(Some(256))));
        assert_eq!(config.cl_device_idx, 1);
        assert_eq!(config.seed, Some(20181205));
        Ok(())
    }

    #[test]
    fn test_local_size_none() -> crate::Result<()> {
        let config = RunConfig::from_lookup(lookup(&[
            ("VECADD_STRATEGY", "kernel"),
            ("VECADD_LOCAL_SIZE", "None"),
        ]))?;
        assert_eq!(config.strategy, Strategy::Kernel(KernelAdd::new(None)));
        Ok(())
    }

    #[test]
    fn test_invalid_values() {
        let err = RunConfig::from_lookup(lookup(&[("VECADD_CL_DEVICE_IDX", "first")])).unwrap_err();
        assert_eq!(err.kind(), Some(&DeviceError::InvalidDeviceIdx));

        let err = RunConfig::from_lookup(lookup(&[("VECADD_BACKEND", "cuda")])).unwrap_err();
        assert_eq!(err.kind(), Some(&DeviceError::InvalidBackend));

        let err = RunConfig::from_lookup(lookup(&[
            ("VECADD_STRATEGY", "kernel"),
            ("VECADD_LOCAL_SIZE", "0"),
        ]))
        .unwrap_err();
        assert_eq!(err.kind(), Some(&DeviceError::InvalidWorkSize));

        assert!(RunConfig::from_lookup(lookup(&[("VECADD_SEED", "-1")])).is_err());
    }
}
