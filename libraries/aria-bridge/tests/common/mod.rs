//! Shared doubles and helpers for bridge integration tests
#![allow(dead_code)]

use aria_core::Track;
use aria_playback::{ResolvedSource, Result, SourceResolver, TrackDone, Transport};
use async_trait::async_trait;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Resolver double: every query maps to one deterministic track, except
/// queries starting with `missing` which return no results.
#[derive(Default)]
pub struct StubResolver;

#[async_trait]
impl SourceResolver for StubResolver {
    async fn search(&self, query: &str) -> Result<Vec<Track>> {
        if query.starts_with("missing") {
            return Ok(vec![]);
        }
        Ok(vec![Track::new(
            query,
            format!("source:{query}"),
            format!("https://page/{query}"),
            120,
        )])
    }

    async fn resolve(&self, source_url: &str) -> Result<Option<ResolvedSource>> {
        Ok(Some(ResolvedSource::new(format!("stream:{source_url}"))))
    }
}

/// Minimal recording transport for tests that need live playback.
#[derive(Default)]
pub struct StubTransport {
    playing: AtomicBool,
    paused: AtomicBool,
    pub played: Mutex<Vec<String>>,
    done: Mutex<Option<TrackDone>>,
}

impl StubTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn finish_current(&self) {
        self.playing.store(false, Ordering::SeqCst);
        if let Some(done) = self.done.lock().unwrap().take() {
            done.raise();
        }
    }

    pub fn played(&self) -> Vec<String> {
        self.played.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn play(&self, source: &ResolvedSource, _volume: u16, done: TrackDone) -> Result<()> {
        self.played.lock().unwrap().push(source.stream_url.clone());
        *self.done.lock().unwrap() = Some(done);
        self.playing.store(true, Ordering::SeqCst);
        self.paused.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn pause(&self) {
        if self.playing.swap(false, Ordering::SeqCst) {
            self.paused.store(true, Ordering::SeqCst);
        }
    }

    async fn resume(&self) {
        if self.paused.swap(false, Ordering::SeqCst) {
            self.playing.store(true, Ordering::SeqCst);
        }
    }

    async fn stop(&self) {
        self.playing.store(false, Ordering::SeqCst);
        self.paused.store(false, Ordering::SeqCst);
        if let Some(done) = self.done.lock().unwrap().take() {
            done.raise();
        }
    }

    async fn set_volume(&self, _level: u16) {}

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    async fn disconnect(&self) {
        self.playing.store(false, Ordering::SeqCst);
        self.paused.store(false, Ordering::SeqCst);
        self.done.lock().unwrap().take();
    }
}

/// Append one line (with newline) to a log file.
pub fn append_line(path: &Path, line: &str) {
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .unwrap();
    writeln!(file, "{line}").unwrap();
}

/// Append raw bytes without a trailing newline.
pub fn append_raw(path: &Path, bytes: &[u8]) {
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .unwrap();
    file.write_all(bytes).unwrap();
}

/// Install a test subscriber so `RUST_LOG` works when debugging tests.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
