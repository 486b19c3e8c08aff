/// Boxed error type. Errors coming from the OpenCL binding are propagated unchanged.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = core::result::Result<T, Error>;

/// Downcasts a boxed [`Error`] to a concrete error type.
pub trait ErrorKind {
    fn kind<E: std::error::Error + PartialEq + 'static>(&self) -> Option<&E>;
}

impl ErrorKind for Error {
    #[inline]
    fn kind<E: std::error::Error + PartialEq + 'static>(&self) -> Option<&E> {
        self.downcast_ref::<E>()
    }
}

#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum DeviceError {
    InvalidWorkSize,
    LengthMismatch,
    Uninitialized,
    InvalidStrategy,
    InvalidBackend,
    InvalidDeviceIdx,
    BackendUnavailable,
}

impl DeviceError {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceError::InvalidWorkSize => {
                "The global and local work size must both be greater than zero."
            }
            DeviceError::LengthMismatch => "Both operands must have the same number of elements.",
            DeviceError::Uninitialized => "This buffer is not associated with a device.",
            DeviceError::InvalidStrategy => {
                "Unknown addition strategy. Expected either 'library' or 'kernel'."
            }
            DeviceError::InvalidBackend => "Unknown backend. Expected either 'cpu' or 'opencl'.",
            DeviceError::InvalidDeviceIdx => "The device index must be a usize value.",
            DeviceError::BackendUnavailable => {
                "The requested backend was not compiled in. Enable the matching cargo feature."
            }
        }
    }
}

impl core::fmt::Debug for DeviceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl core::fmt::Display for DeviceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for DeviceError {}

#[cfg(test)]
mod tests {
    use super::{DeviceError, Error, ErrorKind};

    #[test]
    fn test_kind_downcast() {
        let err: Error = DeviceError::LengthMismatch.into();
        assert_eq!(err.kind(), Some(&DeviceError::LengthMismatch));
        assert_eq!(
            err.to_string(),
            "Both operands must have the same number of elements."
        );
    }

    #[test]
    fn test_kind_of_foreign_error() {
        let err: Error = "a plain message".into();
        assert_eq!(err.kind::<DeviceError>(), None);
    }
}
