//! Bridge configuration
use crate::error::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File locations and cadences for the control ingestor and state exporter
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BridgeConfig {
    /// Append-only command log written by the external control surface
    #[serde(default = "default_control_log_path")]
    pub control_log_path: PathBuf,

    /// Snapshot file overwritten on every export tick
    #[serde(default = "default_state_file_path")]
    pub state_file_path: PathBuf,

    /// Maximum number of pending tracks included per session snapshot
    #[serde(default = "default_queue_preview_limit")]
    pub queue_preview_limit: usize,

    /// Seconds between state exports
    #[serde(default = "default_export_interval_secs")]
    pub export_interval_secs: u64,

    /// Milliseconds between control-log polls
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl BridgeConfig {
    /// Load configuration from the environment
    ///
    /// Reads `ARIA_*` variables (`ARIA_CONTROL_LOG_PATH`,
    /// `ARIA_STATE_FILE_PATH`, `ARIA_QUEUE_PREVIEW_LIMIT`,
    /// `ARIA_EXPORT_INTERVAL_SECS`, `ARIA_POLL_INTERVAL_MS`); every field
    /// falls back to its default when unset.
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("ARIA").try_parsing(true))
            .build()
            .map_err(|e| BridgeError::Config(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| BridgeError::Config(e.to_string()))
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            control_log_path: default_control_log_path(),
            state_file_path: default_state_file_path(),
            queue_preview_limit: default_queue_preview_limit(),
            export_interval_secs: default_export_interval_secs(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

fn default_control_log_path() -> PathBuf {
    PathBuf::from("aria_control.jsonl")
}

fn default_state_file_path() -> PathBuf {
    PathBuf::from("aria_state.json")
}

fn default_queue_preview_limit() -> usize {
    100
}

fn default_export_interval_secs() -> u64 {
    3
}

fn default_poll_interval_ms() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = BridgeConfig::default();
        assert_eq!(config.control_log_path, PathBuf::from("aria_control.jsonl"));
        assert_eq!(config.state_file_path, PathBuf::from("aria_state.json"));
        assert_eq!(config.queue_preview_limit, 100);
        assert_eq!(config.export_interval_secs, 3);
        assert_eq!(config.poll_interval_ms, 1000);
    }

    #[test]
    fn empty_object_deserializes_to_defaults() {
        let config: BridgeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.queue_preview_limit, 100);
    }
}
