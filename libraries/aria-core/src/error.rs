/// Core error types for Aria
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Aria
#[derive(Error, Debug)]
pub enum CoreError {
    /// A repeat mode string was not one of `off`, `track`, `queue`, `auto`
    #[error("Invalid repeat mode: {0}")]
    InvalidRepeatMode(String),
}
