//! Aria - Playback Engine
//!
//! Per-session media playback for Aria.
//!
//! This crate provides:
//! - Ordered pending queue with 1-based index edits (move/remove/shuffle)
//! - One `Session` per guild/room: queue, current-track slot, volume,
//!   repeat mode, transport handle
//! - A scheduler loop per session that sequences playback and applies
//!   repeat policy on completion
//! - A lazily-populated session registry shared by every control surface
//!
//! # Architecture
//!
//! `aria-playback` knows nothing about where audio comes from or where it
//! goes. The two collaborators are traits:
//! - [`SourceResolver`] turns queries and source locators into track
//!   metadata and streamable handles
//! - [`Transport`] renders a resolved source and raises a [`TrackDone`]
//!   completion signal when the track ends, is stopped, or is skipped
//!
//! All queue and current-slot mutation serializes through the session's
//! internal guard, so the scheduler loop, control ingestion, and any
//! front-end can edit concurrently without coordination beyond the session
//! handle itself.
//!
//! # Example
//!
//! ```rust,no_run
//! use aria_core::{SessionId, Track};
//! use aria_playback::SessionRegistry;
//! # use aria_playback::{ResolvedSource, Result, SourceResolver};
//! # use std::sync::Arc;
//! # struct MyResolver;
//! # #[async_trait::async_trait]
//! # impl SourceResolver for MyResolver {
//! #     async fn search(&self, _query: &str) -> Result<Vec<Track>> { Ok(vec![]) }
//! #     async fn resolve(&self, _source_url: &str) -> Result<Option<ResolvedSource>> { Ok(None) }
//! # }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let registry = SessionRegistry::new(Arc::new(MyResolver));
//! let session = registry.get_or_create(SessionId::new(7)).await;
//!
//! session.enqueue(Track::new("Song", "locator", "https://page", 180)).await;
//! session.ensure_started().await;
//! # }
//! ```

#![forbid(unsafe_code)]

mod error;
mod player;
mod queue;
mod registry;
mod resolver;
mod session;
mod transport;

// Public exports
pub use error::{PlaybackError, Result};
pub use queue::Queue;
pub use registry::SessionRegistry;
pub use resolver::{ResolvedSource, SourceResolver};
pub use session::{Session, SessionView, DEFAULT_VOLUME, MAX_VOLUME, MIN_VOLUME};
pub use transport::{TrackDone, Transport};
