//! Domain types for Aria

mod ids;
mod repeat;
mod track;

pub use ids::{SessionId, UserId};
pub use repeat::RepeatMode;
pub use track::{Track, TrackBrief};
