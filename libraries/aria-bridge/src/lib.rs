//! Aria Bridge
//!
//! File-based integration between the playback engine and an external
//! control surface (for example a web dashboard):
//!
//! - [`ControlIngestor`] tails an append-only, newline-delimited JSON log
//!   of commands and dispatches them onto playback sessions
//! - [`StateExporter`] periodically snapshots every live session into a
//!   JSON file an external viewer can read
//! - [`BridgeConfig`] reads both file locations and cadences from `ARIA_*`
//!   environment variables, with a temp-directory fallback when a path is
//!   not writable
//!
//! Both workers are best-effort: decode failures skip the one bad record,
//! I/O failures are logged and retried on the next tick, and nothing in
//! this crate can stall playback.
//!
//! # Example
//!
//! ```rust,no_run
//! use aria_bridge::{BridgeConfig, ControlIngestor, StateExporter};
//! use aria_playback::SessionRegistry;
//! use std::sync::Arc;
//! # use aria_core::Track;
//! # use aria_playback::{ResolvedSource, Result, SourceResolver};
//! # struct MyResolver;
//! # #[async_trait::async_trait]
//! # impl SourceResolver for MyResolver {
//! #     async fn search(&self, _query: &str) -> Result<Vec<Track>> { Ok(vec![]) }
//! #     async fn resolve(&self, _source_url: &str) -> Result<Option<ResolvedSource>> { Ok(None) }
//! # }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> aria_bridge::Result<()> {
//! let config = BridgeConfig::load()?;
//! let registry = Arc::new(SessionRegistry::new(Arc::new(MyResolver)));
//!
//! tokio::spawn(ControlIngestor::new(Arc::clone(&registry), &config).run());
//! tokio::spawn(StateExporter::new(registry, &config).run());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod config;
pub mod control;
mod error;
pub mod export;
mod paths;

// Public exports
pub use config::BridgeConfig;
pub use control::{ControlCommand, ControlIngestor};
pub use error::{BridgeError, Result};
pub use export::StateExporter;
pub use paths::ensure_writable;
