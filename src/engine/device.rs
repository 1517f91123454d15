use candle_core::Device;
use tracing::{debug, info, warn};

use super::error::EngineError;

/// Which compute device the generator should run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DevicePreference {
    /// First GPU backend compiled into this build, else CPU.
    #[default]
    Auto,
    Cpu,
    /// Metal device with the given ordinal; no CPU fallback.
    Metal(usize),
    /// CUDA device with the given ordinal; no CPU fallback.
    Cuda(usize),
}

/// Opens the device for `preference`.
///
/// An explicitly requested GPU that cannot be opened (including a backend not
/// compiled into this build) is an error. `Auto` never fails.
pub fn resolve_device(preference: DevicePreference) -> Result<Device, EngineError> {
    match preference {
        DevicePreference::Cpu => Ok(Device::Cpu),
        DevicePreference::Metal(ordinal) => {
            Device::new_metal(ordinal).map_err(|e| unavailable("metal", ordinal, e))
        }
        DevicePreference::Cuda(ordinal) => {
            Device::new_cuda(ordinal).map_err(|e| unavailable("cuda", ordinal, e))
        }
        DevicePreference::Auto => Ok(auto_device()),
    }
}

fn unavailable(backend: &str, ordinal: usize, err: candle_core::Error) -> EngineError {
    EngineError::DeviceUnavailable {
        device: format!("{backend}:{ordinal}"),
        reason: err.to_string(),
    }
}

fn auto_device() -> Device {
    let candidates: [(&str, bool, fn(usize) -> candle_core::Result<Device>); 2] = [
        ("metal", cfg!(feature = "metal"), Device::new_metal),
        ("cuda", cfg!(feature = "cuda"), Device::new_cuda),
    ];

    for (backend, compiled, open) in candidates {
        if !compiled {
            continue;
        }
        match open(0) {
            Ok(device) => {
                info!(backend, "Using GPU acceleration");
                return device;
            }
            Err(e) => warn!(backend, error = %e, "GPU backend unavailable"),
        }
    }

    debug!("Running on CPU");
    Device::Cpu
}
