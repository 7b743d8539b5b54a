//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The transport collaborator failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// The source resolver collaborator failed
    #[error("Resolver error: {0}")]
    Resolver(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
