//! Error types for Predikit

/// Result type alias using Predikit's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Predikit operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Predictor library loading errors
    #[error("loader error: {0}")]
    Loader(String),

    /// Entry-point resolution errors
    #[error("resolution error: {0}")]
    Resolution(String),

    /// Handle validation and provisioning errors
    #[error("provision error: {0}")]
    Provision(String),

    /// Serving-platform errors
    #[error("platform error: {0}")]
    Platform(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// No predictor component was configured at startup
    #[error("no predictor component is configured")]
    ComponentUnavailable,

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new loader error
    pub fn loader(msg: impl Into<String>) -> Self {
        Self::Loader(msg.into())
    }

    /// Create a new resolution error
    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::Resolution(msg.into())
    }

    /// Create a new provision error
    pub fn provision(msg: impl Into<String>) -> Self {
        Self::Provision(msg.into())
    }

    /// Create a new platform error
    pub fn platform(msg: impl Into<String>) -> Self {
        Self::Platform(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
