//! State exporter integration tests
//!
//! Exports real registries into a temp directory and checks the wire shape
//! an external viewer depends on.

mod common;

use aria_bridge::{BridgeConfig, StateExporter};
use aria_core::{SessionId, Track};
use aria_playback::SessionRegistry;
use common::{StubResolver, StubTransport};
use serde_json::Value;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn track(title: &str) -> Track {
    Track::new(
        title,
        format!("source:{title}"),
        format!("https://page/{title}"),
        60,
    )
    .with_thumbnail(format!("https://img/{title}.jpg"))
}

struct Harness {
    _dir: TempDir,
    state_file: PathBuf,
    registry: Arc<SessionRegistry>,
    exporter: StateExporter,
}

fn harness_with(preview_limit: usize) -> Harness {
    common::init_logging();
    let dir = TempDir::new().unwrap();
    let config = BridgeConfig {
        control_log_path: dir.path().join("control.jsonl"),
        state_file_path: dir.path().join("state.json"),
        queue_preview_limit: preview_limit,
        ..BridgeConfig::default()
    };
    let registry = Arc::new(SessionRegistry::new(Arc::new(StubResolver)));
    let exporter = StateExporter::new(Arc::clone(&registry), &config);
    Harness {
        state_file: config.state_file_path.clone(),
        _dir: dir,
        registry,
        exporter,
    }
}

fn read_snapshot(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

async fn wait_until<F, Fut>(what: &str, mut probe: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..400 {
        if probe().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    panic!("timed out waiting for: {what}");
}

#[tokio::test]
async fn empty_registry_exports_an_empty_object() {
    let h = harness_with(100);
    h.exporter.export_once().await.unwrap();

    let snapshot = read_snapshot(&h.state_file);
    assert_eq!(snapshot, serde_json::json!({}));
}

#[tokio::test]
async fn exports_every_session_keyed_by_string_id() {
    let h = harness_with(100);

    let first = h.registry.get_or_create(SessionId::new(1)).await;
    first.enqueue(track("A")).await;
    first.enqueue(track("B")).await;
    first.set_volume(150).await;

    h.registry.get_or_create(SessionId::new(2)).await;

    h.exporter.export_once().await.unwrap();
    let snapshot = read_snapshot(&h.state_file);

    let entry = &snapshot["1"];
    assert_eq!(entry["session_id"], 1);
    assert_eq!(entry["current"], Value::Null);
    assert_eq!(entry["volume"], 150);
    assert_eq!(entry["loop"], "off");
    assert_eq!(entry["queue_len"], 2);
    assert_eq!(entry["queue"][0]["title"], "A");
    assert_eq!(entry["queue"][0]["url"], "https://page/A");
    assert_eq!(entry["queue"][0]["duration"], 60);
    assert_eq!(entry["queue"][0]["thumb"], "https://img/A.jpg");
    assert!(entry["ts"].as_i64().unwrap() > 0);

    let idle = &snapshot["2"];
    assert_eq!(idle["session_id"], 2);
    assert_eq!(idle["queue_len"], 0);
    assert_eq!(idle["queue"], serde_json::json!([]));
}

#[tokio::test]
async fn queue_preview_is_bounded_but_length_is_not() {
    let h = harness_with(3);

    let session = h.registry.get_or_create(SessionId::new(1)).await;
    for i in 0..10 {
        session.enqueue(track(&format!("t{i}"))).await;
    }

    h.exporter.export_once().await.unwrap();
    let snapshot = read_snapshot(&h.state_file);

    assert_eq!(snapshot["1"]["queue_len"], 10);
    assert_eq!(snapshot["1"]["queue"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn snapshot_overwrites_the_file_wholesale() {
    let h = harness_with(100);
    h.registry.get_or_create(SessionId::new(1)).await;

    // Stale garbage from a previous run must not survive an export.
    std::fs::write(&h.state_file, "NOT JSON {{{{").unwrap();

    h.exporter.export_once().await.unwrap();
    let snapshot = read_snapshot(&h.state_file);
    assert!(snapshot.as_object().unwrap().contains_key("1"));
    assert_eq!(snapshot.as_object().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn current_track_is_exported_as_a_brief() {
    let h = harness_with(100);

    let session = h.registry.get_or_create(SessionId::new(3)).await;
    let transport = StubTransport::new();
    session.attach_transport(transport.clone()).await;
    session.enqueue(track("NowPlaying")).await;
    session.clone().ensure_started().await;

    wait_until("track started", || async { transport.played().len() == 1 }).await;

    h.exporter.export_once().await.unwrap();
    let snapshot = read_snapshot(&h.state_file);

    let current = &snapshot["3"]["current"];
    assert_eq!(current["title"], "NowPlaying");
    assert_eq!(current["url"], "https://page/NowPlaying");
    assert_eq!(current["duration"], 60);
    assert_eq!(snapshot["3"]["queue_len"], 0);
}
