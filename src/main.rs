use tracing::info;
use tracing_subscriber::EnvFilter;
use vecadd::{
    config::{Backend, RunConfig},
    pipeline::{run_random, AddReport},
    DeviceError, Result,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = RunConfig::from_env()?;
    info!(backend = %config.backend, strategy = %config.strategy, len = config.len, "starting run");

    let report = run(&config)?;

    println!("{report}");
    println!("Success: {}", report.within_epsilon);
    Ok(())
}

fn run(config: &RunConfig) -> Result<AddReport> {
    match config.backend {
        #[cfg(feature = "cpu")]
        Backend::Cpu => {
            let device = vecadd::CPU::new();
            run_random(&device, &config.strategy, config.len, config.seed)
        }
        #[cfg(feature = "opencl")]
        Backend::OpenCL => {
            let device = vecadd::OpenCL::new(config.cl_device_idx)?;
            run_random(&device, &config.strategy, config.len, config.seed)
        }
        #[allow(unreachable_patterns)]
        _ => Err(DeviceError::BackendUnavailable.into()),
    }
}
