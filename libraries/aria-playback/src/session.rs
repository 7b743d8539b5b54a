//! Per-guild playback session
//!
//! A `Session` owns the pending queue, the current-track slot, volume, and
//! repeat mode for one guild/room, plus an optional transport handle. The
//! scheduler loop, control ingestion, and any front-end all hold
//! `Arc<Session>` and mutate through the methods here; every method
//! serializes on the session's internal guard and never holds it across a
//! transport await.

use crate::player;
use crate::queue::Queue;
use crate::resolver::SourceResolver;
use crate::transport::Transport;
use aria_core::{RepeatMode, SessionId, Track, TrackBrief};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Lowest accepted volume level
pub const MIN_VOLUME: u16 = 1;

/// Highest accepted volume level
pub const MAX_VOLUME: u16 = 200;

/// Volume a fresh session starts with
pub const DEFAULT_VOLUME: u16 = 100;

/// State behind the session guard
///
/// The queue and current slot are the only data mutated by more than one
/// task, so everything that must stay consistent with them lives together
/// under one lock.
pub(crate) struct PlayerState {
    pub(crate) queue: Queue,
    pub(crate) current: Option<Track>,
    pub(crate) volume: u16,
    pub(crate) repeat: RepeatMode,
    pub(crate) transport: Option<Arc<dyn Transport>>,
}

/// Playback state for one guild/room
pub struct Session {
    id: SessionId,
    pub(crate) inner: Mutex<PlayerState>,
    pub(crate) resolver: Arc<dyn SourceResolver>,
    player_task: Mutex<Option<JoinHandle<()>>>,
}

impl Session {
    /// Create an idle session with an empty queue
    pub fn new(id: SessionId, resolver: Arc<dyn SourceResolver>) -> Self {
        Self {
            id,
            inner: Mutex::new(PlayerState {
                queue: Queue::new(),
                current: None,
                volume: DEFAULT_VOLUME,
                repeat: RepeatMode::Off,
                transport: None,
            }),
            resolver,
            player_task: Mutex::new(None),
        }
    }

    /// Session identifier
    pub fn id(&self) -> SessionId {
        self.id
    }

    // ---- queue edits
    //
    // None of these block on the scheduler loop; they take the guard,
    // mutate, and return. The loop picks changes up on its next poll.

    /// Append a track to the tail of the pending queue
    pub async fn enqueue(&self, track: Track) {
        let mut state = self.inner.lock().await;
        state.queue.push_back(track);
    }

    /// Insert a track at the head of the pending queue (plays next)
    pub async fn enqueue_front(&self, track: Track) {
        let mut state = self.inner.lock().await;
        state.queue.push_front(track);
    }

    /// Number of pending tracks
    pub async fn queue_len(&self) -> usize {
        self.inner.lock().await.queue.len()
    }

    /// Move a pending track between 1-based positions
    ///
    /// Returns `false` without mutating if either index is out of bounds.
    pub async fn move_track(&self, src: usize, dst: usize) -> bool {
        let mut state = self.inner.lock().await;
        state.queue.move_to(src, dst)
    }

    /// Remove the pending track at a 1-based index
    pub async fn remove_track(&self, index: usize) -> Option<Track> {
        let mut state = self.inner.lock().await;
        state.queue.remove_at(index)
    }

    /// Shuffle the pending queue (the current track is unaffected)
    pub async fn shuffle(&self) {
        let mut state = self.inner.lock().await;
        state.queue.shuffle();
    }

    /// Clear the pending queue, leaving the current track playing
    pub async fn clear_pending(&self) {
        let mut state = self.inner.lock().await;
        state.queue.clear();
    }

    // ---- playback settings

    /// Current repeat mode
    pub async fn repeat(&self) -> RepeatMode {
        self.inner.lock().await.repeat
    }

    /// Set the repeat mode
    pub async fn set_repeat(&self, mode: RepeatMode) {
        let mut state = self.inner.lock().await;
        state.repeat = mode;
    }

    /// Current volume level
    pub async fn volume(&self) -> u16 {
        self.inner.lock().await.volume
    }

    /// Set the volume, clamped to `[MIN_VOLUME, MAX_VOLUME]`
    ///
    /// The stored level applies to the next track; if a transport is
    /// attached the new level is also applied to the live output. Returns
    /// the clamped value.
    pub async fn set_volume(&self, level: u16) -> u16 {
        let clamped = level.clamp(MIN_VOLUME, MAX_VOLUME);
        let transport = {
            let mut state = self.inner.lock().await;
            state.volume = clamped;
            state.transport.clone()
        };
        if let Some(transport) = transport {
            transport.set_volume(clamped).await;
        }
        clamped
    }

    // ---- transport

    /// Attach the transport handle this session renders through
    pub async fn attach_transport(&self, transport: Arc<dyn Transport>) {
        let mut state = self.inner.lock().await;
        state.transport = Some(transport);
    }

    /// Current transport handle, if any
    pub async fn transport(&self) -> Option<Arc<dyn Transport>> {
        self.inner.lock().await.transport.clone()
    }

    /// Pause the live output if something is playing
    pub async fn pause(&self) {
        if let Some(transport) = self.transport().await {
            if transport.is_playing() {
                transport.pause().await;
            }
        }
    }

    /// Resume the live output if it is paused
    pub async fn resume(&self) {
        if let Some(transport) = self.transport().await {
            if transport.is_paused() {
                transport.resume().await;
            }
        }
    }

    /// Force-stop the current track
    ///
    /// The transport raises the completion signal, so the scheduler loop
    /// advances through the normal repeat-policy path.
    pub async fn skip(&self) {
        if let Some(transport) = self.transport().await {
            transport.stop().await;
        }
    }

    /// Stop playback entirely: clear the queue and the current slot
    ///
    /// The current slot is cleared before the transport stop, so the
    /// completion dispatch that follows finds nothing to retain or
    /// re-append regardless of repeat mode.
    pub async fn stop(&self) {
        let transport = {
            let mut state = self.inner.lock().await;
            state.queue.clear();
            state.current = None;
            state.transport.clone()
        };
        if let Some(transport) = transport {
            transport.stop().await;
        }
        debug!(session = %self.id, "playback stopped");
    }

    // ---- scheduler loop lifecycle

    /// Start the scheduler loop for this session
    ///
    /// Idempotent: if a loop is already running this is a no-op. A loop
    /// ended by [`Session::teardown`] can be started again.
    pub async fn ensure_started(self: Arc<Self>) {
        let mut task = self.player_task.lock().await;
        if let Some(handle) = task.as_ref() {
            if !handle.is_finished() {
                return;
            }
        }
        let session = Arc::clone(&self);
        *task = Some(tokio::spawn(player::run(session)));
    }

    /// Whether the scheduler loop is currently running
    pub async fn player_running(&self) -> bool {
        self.player_task
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Tear the session down
    ///
    /// Cancels the scheduler loop, clears the queue and current slot, and
    /// releases the transport. Idempotent; the session object itself stays
    /// registered and can be revived by a later enqueue + start.
    pub async fn teardown(&self) {
        if let Some(handle) = self.player_task.lock().await.take() {
            handle.abort();
        }
        let transport = {
            let mut state = self.inner.lock().await;
            state.queue.clear();
            state.current = None;
            state.transport.take()
        };
        if let Some(transport) = transport {
            transport.disconnect().await;
        }
        info!(session = %self.id, "session torn down");
    }

    // ---- observation

    /// Snapshot this session for external viewers
    ///
    /// The queue preview is bounded to `preview_limit` entries so snapshot
    /// size stays bounded under large queues.
    pub async fn snapshot(&self, preview_limit: usize) -> SessionView {
        let state = self.inner.lock().await;
        SessionView {
            session_id: self.id,
            current: state.current.as_ref().map(Track::brief),
            volume: state.volume,
            repeat: state.repeat,
            queue_len: state.queue.len(),
            queue: state
                .queue
                .iter()
                .take(preview_limit)
                .map(Track::brief)
                .collect(),
        }
    }
}

/// Serializable summary of one session
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    /// Session identifier
    pub session_id: SessionId,

    /// Current track, if one is loaded
    pub current: Option<TrackBrief>,

    /// Volume level
    pub volume: u16,

    /// Repeat mode
    #[serde(rename = "loop")]
    pub repeat: RepeatMode,

    /// Total number of pending tracks
    pub queue_len: usize,

    /// Bounded prefix of the pending queue
    pub queue: Vec<TrackBrief>,
}
