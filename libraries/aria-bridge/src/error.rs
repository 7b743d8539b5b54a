//! Error types for the bridge

use thiserror::Error;

/// Bridge errors
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Configuration could not be read
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem access failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot serialization failed
    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;
