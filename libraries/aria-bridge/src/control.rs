//! Control-log ingestion
//!
//! Tails an append-only log of newline-delimited JSON command records and
//! dispatches them onto playback sessions. Delivery is at-least-once and
//! ordered per writer: the ingestor attaches at the current end of the log
//! (history is never replayed), advances its offset by exactly the bytes it
//! consumed, and leaves a partially written trailing record in place until
//! its newline arrives. One undecodable record is skipped without
//! disturbing its neighbours.

use crate::config::BridgeConfig;
use crate::error::Result;
use crate::paths;
use aria_core::{RepeatMode, SessionId, UserId};
use aria_playback::{Session, SessionRegistry, MAX_VOLUME, MIN_VOLUME};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncSeekExt, SeekFrom};
use tracing::{debug, info, warn};

/// Extra delay after a failed poll before trying again
const ERROR_BACKOFF: Duration = Duration::from_millis(1500);

/// One decoded control record
///
/// Wire form is `{"action": "...", "payload": {...}}`. The session
/// identifier accepts both `session_id` and the legacy `guild_id` key; a
/// record without one decodes with id 0 and is dropped at dispatch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "snake_case")]
pub enum ControlCommand {
    /// Pause the live output
    Pause {
        /// Target session
        #[serde(default, alias = "guild_id")]
        session_id: u64,
    },
    /// Resume paused output
    Resume {
        /// Target session
        #[serde(default, alias = "guild_id")]
        session_id: u64,
    },
    /// Force-stop the current track
    Skip {
        /// Target session
        #[serde(default, alias = "guild_id")]
        session_id: u64,
    },
    /// Clear the queue and current track, stop the transport
    Stop {
        /// Target session
        #[serde(default, alias = "guild_id")]
        session_id: u64,
    },
    /// Shuffle the pending queue
    Shuffle {
        /// Target session
        #[serde(default, alias = "guild_id")]
        session_id: u64,
    },
    /// Tear the session down entirely
    Leave {
        /// Target session
        #[serde(default, alias = "guild_id")]
        session_id: u64,
    },
    /// Clear the pending queue only
    Clear {
        /// Target session
        #[serde(default, alias = "guild_id")]
        session_id: u64,
    },
    /// Set the repeat mode
    Loop {
        /// Target session
        #[serde(default, alias = "guild_id")]
        session_id: u64,
        /// One of `off`, `track`, `queue`, `auto`
        mode: RepeatMode,
    },
    /// Set the volume (clamped to the accepted range)
    Volume {
        /// Target session
        #[serde(default, alias = "guild_id")]
        session_id: u64,
        /// Requested level
        level: i64,
    },
    /// Resolve a query and append the first hit to the queue
    Play {
        /// Target session
        #[serde(default, alias = "guild_id")]
        session_id: u64,
        /// Free-form query or URL
        query: String,
        /// User the track is queued for
        #[serde(default)]
        user_id: u64,
    },
    /// Resolve a query and insert the first hit at the head of the queue
    #[serde(rename = "playtop")]
    PlayTop {
        /// Target session
        #[serde(default, alias = "guild_id")]
        session_id: u64,
        /// Free-form query or URL
        query: String,
        /// User the track is queued for
        #[serde(default)]
        user_id: u64,
    },
    /// Remove the pending track at a 1-based index
    QueueRemove {
        /// Target session
        #[serde(default, alias = "guild_id")]
        session_id: u64,
        /// 1-based queue position
        index: i64,
    },
    /// Move a pending track between 1-based indices
    QueueMove {
        /// Target session
        #[serde(default, alias = "guild_id")]
        session_id: u64,
        /// 1-based source position
        src: i64,
        /// 1-based destination position
        dst: i64,
    },
}

impl ControlCommand {
    /// Target session, if the record carried a usable identifier
    pub fn session_id(&self) -> Option<SessionId> {
        let raw = match self {
            ControlCommand::Pause { session_id }
            | ControlCommand::Resume { session_id }
            | ControlCommand::Skip { session_id }
            | ControlCommand::Stop { session_id }
            | ControlCommand::Shuffle { session_id }
            | ControlCommand::Leave { session_id }
            | ControlCommand::Clear { session_id }
            | ControlCommand::Loop { session_id, .. }
            | ControlCommand::Volume { session_id, .. }
            | ControlCommand::Play { session_id, .. }
            | ControlCommand::PlayTop { session_id, .. }
            | ControlCommand::QueueRemove { session_id, .. }
            | ControlCommand::QueueMove { session_id, .. } => *session_id,
        };
        (raw != 0).then_some(SessionId::new(raw))
    }
}

/// Tails the control log and applies commands to sessions
pub struct ControlIngestor {
    registry: Arc<SessionRegistry>,
    path: PathBuf,
    offset: u64,
    poll_interval: Duration,
}

impl ControlIngestor {
    /// Create an ingestor for the configured control log
    ///
    /// The log file is created (with a temp fallback) so the external
    /// writer and this reader agree on a path from the start.
    pub fn new(registry: Arc<SessionRegistry>, config: &BridgeConfig) -> Self {
        Self {
            registry,
            path: paths::ensure_writable(&config.control_log_path),
            offset: 0,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }

    /// Record the current end of the log as the starting offset
    ///
    /// Everything already in the file is history from before this process
    /// attached and is never replayed.
    pub async fn attach(&mut self) {
        self.offset = match tokio::fs::metadata(&self.path).await {
            Ok(meta) => meta.len(),
            Err(_) => 0,
        };
        info!(
            path = %self.path.display(),
            offset = self.offset,
            "control ingestor attached"
        );
    }

    /// Read and apply every complete record appended since the last tick
    pub async fn tick(&mut self) -> Result<()> {
        let len = tokio::fs::metadata(&self.path).await?.len();
        if len < self.offset {
            warn!(path = %self.path.display(), "control log shrank, resetting offset");
            self.offset = len;
            return Ok(());
        }
        if len == self.offset {
            return Ok(());
        }

        let mut file = tokio::fs::File::open(&self.path).await?;
        file.seek(SeekFrom::Start(self.offset)).await?;
        let mut buf = Vec::new();
        file.take(len - self.offset).read_to_end(&mut buf).await?;

        // Only complete records are consumed; a partially written trailing
        // line stays in the log until its newline arrives.
        let Some(last_newline) = buf.iter().rposition(|&b| b == b'\n') else {
            return Ok(());
        };
        let consumed = &buf[..=last_newline];
        self.offset += consumed.len() as u64;

        for line in consumed.split(|&b| b == b'\n') {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            if line.is_empty() {
                continue;
            }
            match serde_json::from_slice::<ControlCommand>(line) {
                Ok(command) => self.apply(command).await,
                Err(err) => debug!(error = %err, "skipping undecodable control record"),
            }
        }
        Ok(())
    }

    /// Apply one decoded command to its session
    pub async fn apply(&self, command: ControlCommand) {
        let Some(session_id) = command.session_id() else {
            debug!("control record without session id dropped");
            return;
        };
        let session = self.registry.get_or_create(session_id).await;

        match command {
            ControlCommand::Pause { .. } => session.pause().await,
            ControlCommand::Resume { .. } => session.resume().await,
            ControlCommand::Skip { .. } => session.skip().await,
            ControlCommand::Stop { .. } => session.stop().await,
            ControlCommand::Shuffle { .. } => session.shuffle().await,
            ControlCommand::Leave { .. } => session.teardown().await,
            ControlCommand::Clear { .. } => session.clear_pending().await,
            ControlCommand::Loop { mode, .. } => session.set_repeat(mode).await,
            ControlCommand::Volume { level, .. } => {
                let level = level.clamp(i64::from(MIN_VOLUME), i64::from(MAX_VOLUME));
                session.set_volume(level as u16).await;
            }
            ControlCommand::Play { query, user_id, .. } => {
                self.enqueue_query(&session, &query, user_id, false).await;
            }
            ControlCommand::PlayTop { query, user_id, .. } => {
                self.enqueue_query(&session, &query, user_id, true).await;
            }
            ControlCommand::QueueRemove { index, .. } => {
                let index = usize::try_from(index).unwrap_or(0);
                if session.remove_track(index).await.is_none() {
                    debug!(session = %session.id(), index, "queue_remove out of range");
                }
            }
            ControlCommand::QueueMove { src, dst, .. } => {
                let src = usize::try_from(src).unwrap_or(0);
                let dst = usize::try_from(dst).unwrap_or(0);
                if !session.move_track(src, dst).await {
                    debug!(session = %session.id(), src, dst, "queue_move out of range");
                }
            }
        }
    }

    async fn enqueue_query(&self, session: &Arc<Session>, query: &str, user_id: u64, to_front: bool) {
        let query = query.trim();
        if query.is_empty() {
            debug!(session = %session.id(), "play command with empty query dropped");
            return;
        }

        let tracks = match self.registry.resolver().search(query).await {
            Ok(tracks) => tracks,
            Err(err) => {
                warn!(session = %session.id(), query, error = %err, "search failed");
                return;
            }
        };
        let Some(mut track) = tracks.into_iter().next() else {
            debug!(session = %session.id(), query, "no results for control play");
            return;
        };

        if user_id != 0 {
            track.assign_requester(UserId::new(user_id));
        }
        info!(
            session = %session.id(),
            title = track.display_title(),
            to_front,
            "queued from control log"
        );
        if to_front {
            session.enqueue_front(track).await;
        } else {
            session.enqueue(track).await;
        }
        Arc::clone(session).ensure_started().await;
    }

    /// Attach and poll forever
    ///
    /// Tick failures (an unreadable log, transient I/O) are logged and
    /// retried after a backoff; they never escape. The task stops only when
    /// the host cancels it.
    pub async fn run(mut self) {
        self.attach().await;
        loop {
            tokio::time::sleep(self.poll_interval).await;
            if let Err(err) = self.tick().await {
                warn!(error = %err, "control tick failed");
                tokio::time::sleep(ERROR_BACKOFF).await;
            }
        }
    }
}
