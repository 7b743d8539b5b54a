//! Session registry
//!
//! Shared map of live sessions, created lazily on first reference. Sessions
//! are never evicted; teardown empties a session but leaves it registered
//! so a later command can revive it.

use crate::resolver::SourceResolver;
use crate::session::Session;
use aria_core::SessionId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// All live playback sessions, keyed by session identifier
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, Arc<Session>>>,
    resolver: Arc<dyn SourceResolver>,
}

impl SessionRegistry {
    /// Create an empty registry
    ///
    /// The resolver is shared by every session the registry creates.
    pub fn new(resolver: Arc<dyn SourceResolver>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            resolver,
        }
    }

    /// Get a session, creating it on first reference
    pub async fn get_or_create(&self, id: SessionId) -> Arc<Session> {
        if let Some(session) = self.sessions.read().await.get(&id) {
            return Arc::clone(session);
        }

        let mut sessions = self.sessions.write().await;
        // Racing creators both reach here; re-check before inserting.
        if let Some(session) = sessions.get(&id) {
            return Arc::clone(session);
        }
        info!(session = %id, "creating session");
        let session = Arc::new(Session::new(id, Arc::clone(&self.resolver)));
        sessions.insert(id, Arc::clone(&session));
        session
    }

    /// Look up an existing session without creating one
    pub async fn get(&self, id: SessionId) -> Option<Arc<Session>> {
        self.sessions.read().await.get(&id).map(Arc::clone)
    }

    /// Every live session, in no particular order
    pub async fn all(&self) -> Vec<Arc<Session>> {
        self.sessions.read().await.values().map(Arc::clone).collect()
    }

    /// Number of live sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// The resolver shared by all sessions
    pub fn resolver(&self) -> Arc<dyn SourceResolver> {
        Arc::clone(&self.resolver)
    }
}
