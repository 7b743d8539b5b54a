//! Aria Core
//!
//! Shared domain types and error handling for the Aria playback engine.
//!
//! This crate defines the vocabulary the rest of the workspace speaks:
//! - **Domain Types**: `Track`, `TrackBrief`, `RepeatMode`
//! - **Identifiers**: `SessionId`, `UserId`
//! - **Error Handling**: unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use aria_core::types::{RepeatMode, SessionId, Track, UserId};
//!
//! let mut track = Track::new(
//!     "Some Song",
//!     "https://media.example/watch?v=abc123",
//!     "https://media.example/watch?v=abc123",
//!     212,
//! );
//! track.assign_requester(UserId::new(42));
//!
//! let session = SessionId::new(7);
//! let mode: RepeatMode = "queue".parse().unwrap();
//! assert_eq!(mode, RepeatMode::Queue);
//! # let _ = (track, session);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use types::{RepeatMode, SessionId, Track, TrackBrief, UserId};
