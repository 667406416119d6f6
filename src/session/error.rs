use thiserror::Error;

use crate::capture::error::CaptureError;
use crate::graph::error::GraphError;

/// Pose session errors.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("no capture device available")]
    NoCaptureDevice,

    #[error("unsupported model complexity: {0}")]
    UnsupportedModelComplexity(i32),

    #[error("invalid session option: {0}")]
    InvalidOption(String),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, SessionError>;
