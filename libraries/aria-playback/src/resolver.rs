//! Platform-agnostic source resolution trait
//!
//! Abstracts the external extraction service that turns free-form queries
//! and source locators into track metadata and streamable handles.

use crate::error::Result;
use aria_core::Track;
use async_trait::async_trait;

/// A source locator resolved to something the transport can stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    /// Direct stream URL or backend-specific handle
    pub stream_url: String,
}

impl ResolvedSource {
    /// Wrap a streamable handle
    pub fn new(stream_url: impl Into<String>) -> Self {
        Self {
            stream_url: stream_url.into(),
        }
    }
}

/// External media extraction service
#[async_trait]
pub trait SourceResolver: Send + Sync {
    /// Look up track metadata for a free-form query or URL
    ///
    /// Dispatch enqueues the first hit; an empty result means nothing
    /// matched.
    async fn search(&self, query: &str) -> Result<Vec<Track>>;

    /// Resolve a track's source locator into a streamable handle
    ///
    /// `Ok(None)` means the source is currently unavailable. The scheduler
    /// skips the track instead of stalling the queue.
    async fn resolve(&self, source_url: &str) -> Result<Option<ResolvedSource>>;
}
