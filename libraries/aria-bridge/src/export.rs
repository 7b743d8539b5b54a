//! Periodic state export
//!
//! Snapshots every live session into a single JSON file an external viewer
//! (e.g. a web dashboard) can poll. The file is overwritten wholesale on
//! every tick; export is best-effort and never affects playback.

use crate::config::BridgeConfig;
use crate::error::Result;
use crate::paths;
use aria_playback::{SessionRegistry, SessionView};
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// One session's entry in the snapshot file
#[derive(Debug, Serialize)]
struct SnapshotEntry {
    #[serde(flatten)]
    view: SessionView,
    /// Export time, epoch seconds
    ts: i64,
}

/// Writes the state snapshot on a fixed cadence
pub struct StateExporter {
    registry: Arc<SessionRegistry>,
    path: PathBuf,
    interval: Duration,
    preview_limit: usize,
}

impl StateExporter {
    /// Create an exporter for the configured state file
    pub fn new(registry: Arc<SessionRegistry>, config: &BridgeConfig) -> Self {
        Self {
            registry,
            path: paths::ensure_writable(&config.state_file_path),
            interval: Duration::from_secs(config.export_interval_secs),
            preview_limit: config.queue_preview_limit,
        }
    }

    /// Snapshot every live session and overwrite the state file
    pub async fn export_once(&self) -> Result<()> {
        let ts = Utc::now().timestamp();
        let mut snapshot: BTreeMap<String, SnapshotEntry> = BTreeMap::new();
        for session in self.registry.all().await {
            let view = session.snapshot(self.preview_limit).await;
            snapshot.insert(view.session_id.to_string(), SnapshotEntry { view, ts });
        }

        let json = serde_json::to_string_pretty(&snapshot)?;
        tokio::fs::write(&self.path, json).await?;
        debug!(
            path = %self.path.display(),
            sessions = snapshot.len(),
            "state exported"
        );
        Ok(())
    }

    /// Export forever on the configured cadence
    ///
    /// Write failures are logged and swallowed; the next tick simply tries
    /// again. The task stops only when the host cancels it.
    pub async fn run(self) {
        loop {
            if let Err(err) = self.export_once().await {
                warn!(error = %err, "state export failed");
            }
            tokio::time::sleep(self.interval).await;
        }
    }
}
