use thiserror::Error;

/// Graph engine and asset errors.
#[derive(Debug, Clone, Error)]
pub enum GraphError {
    #[error("asset unavailable: {0}")]
    AssetUnavailable(String),

    #[error("graph initialisation failed: {0}")]
    Initialize(String),

    #[error("cannot observe stream {stream}: {reason}")]
    Observe { stream: String, reason: String },

    #[error("graph start failed: {0}")]
    StartRun(String),

    #[error("frame submission failed: {0}")]
    AddFrame(String),

    #[error("output poll failed: {0}")]
    Poll(String),

    #[error("closing input streams failed: {0}")]
    CloseInput(String),

    #[error("graph drain failed: {0}")]
    Drain(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, GraphError>;
