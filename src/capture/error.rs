use thiserror::Error;

/// Capture subsystem errors.
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    #[error("device enumeration failed: {0}")]
    Enumeration(String),

    #[error("device open failed: {0}")]
    Open(String),

    #[error("capture start failed: {0}")]
    Start(String),

    #[error("frame read failed: {0}")]
    Read(String),

    #[error("capture stop failed: {0}")]
    Stop(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, CaptureError>;
