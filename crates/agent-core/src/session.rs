//! Session Management
//!
//! Explicit, caller-owned conversation sessions. Each session wraps its own
//! state behind an async mutex so only one request runs per session at a time,
//! while separate sessions proceed independently.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// Unique session identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A live session holding per-conversation state `T`
pub struct Session<T> {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    inner: Mutex<T>,
}

impl<T> Session<T> {
    fn new(id: SessionId, inner: T) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            inner: Mutex::new(inner),
        }
    }

    /// Exclusive access; waits for any in-flight request on this session
    pub async fn lock(&self) -> tokio::sync::MutexGuard<'_, T> {
        self.inner.lock().await
    }
}

/// In-memory session store
pub struct SessionStore<T> {
    sessions: RwLock<HashMap<SessionId, Arc<Session<T>>>>,
}

impl<T> Default for SessionStore<T> {
    fn default() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> SessionStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session and return it
    pub async fn create(&self, inner: T) -> Arc<Session<T>> {
        let session = Arc::new(Session::new(SessionId::new(), inner));
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());
        tracing::debug!(session = %session.id, "Session created");
        session
    }

    pub async fn get(&self, id: &SessionId) -> Option<Arc<Session<T>>> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Destroy a session; returns whether it existed
    pub async fn remove(&self, id: &SessionId) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            tracing::debug!(session = %id, "Session removed");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
