//! Platform-agnostic audio transport trait
//!
//! Abstracts the collaborator that actually renders a resolved source to an
//! output (a voice connection, a local device, a test double). The session
//! scheduler owns the transport for writes; other tasks may query its state.

use crate::error::Result;
use crate::resolver::ResolvedSource;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// One-shot completion signal for a started track
///
/// Handed to the transport on [`Transport::play`]; the transport raises it
/// exactly once when the track ends, is stopped, or fails mid-stream. The
/// raise may happen on any thread (native audio-pipeline callbacks
/// included): it message-passes into the session's scheduler task rather
/// than touching session state directly. The underlying sender is consumed
/// on first use, so raising again is a no-op.
#[derive(Clone)]
pub struct TrackDone {
    tx: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

impl TrackDone {
    /// Create a signal and the receiver the scheduler loop awaits
    pub(crate) fn new() -> (Self, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                tx: Arc::new(Mutex::new(Some(tx))),
            },
            rx,
        )
    }

    /// Signal that the track has finished
    pub fn raise(&self) {
        let sender = match self.tx.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };
        if let Some(tx) = sender {
            let _ = tx.send(());
        }
    }
}

/// Platform-agnostic audio transport
///
/// Implementors render resolved sources to an output. This trait keeps the
/// playback engine independent of the actual audio stack; sessions work
/// against `Arc<dyn Transport>`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Start rendering a resolved source at the given volume
    ///
    /// `done` must be raised exactly once for this track: on natural end, on
    /// [`Transport::stop`], or if rendering fails after starting.
    async fn play(&self, source: &ResolvedSource, volume: u16, done: TrackDone) -> Result<()>;

    /// Pause the live output
    async fn pause(&self);

    /// Resume paused output
    async fn resume(&self);

    /// Force-stop the current track
    ///
    /// Must raise the pending completion signal; the scheduler treats the
    /// stop like a natural end and applies repeat policy.
    async fn stop(&self);

    /// Apply a volume change to the live output
    async fn set_volume(&self, level: u16);

    /// Whether the transport is actively rendering
    fn is_playing(&self) -> bool;

    /// Whether the transport is paused mid-track
    fn is_paused(&self) -> bool;

    /// Release the underlying output (session teardown)
    async fn disconnect(&self);
}
