//! Conversation session store
//!
//! Per-session ordered message history keyed by an opaque session id.
//! Sessions are created implicitly on first append and never explicitly
//! destroyed; the in-memory store bounds its footprint by evicting the
//! least-recently-used session once a configured capacity is exceeded.

use std::collections::HashMap;
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ChatMessage;

/// Keyed, append-only message history
///
/// Injected into the planner so the backing store can be swapped without
/// touching the turn pipeline. Reads of unknown sessions return an empty
/// history, never an error.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Append a message, creating the session if it does not exist
    async fn append(&self, session_id: &str, message: ChatMessage);

    /// Read the full ordered history for a session
    async fn get(&self, session_id: &str) -> Vec<ChatMessage>;
}

struct SessionEntry {
    messages: Vec<ChatMessage>,
    last_used: Instant,
}

/// Process-memory session store with LRU capacity eviction
pub struct MemoryStore {
    sessions: RwLock<HashMap<String, SessionEntry>>,
    capacity: usize,
}

impl MemoryStore {
    /// Create a store retaining at most `capacity` sessions
    pub fn new(capacity: usize) -> Self {
        debug!(capacity, "MemoryStore::new: called");
        Self {
            sessions: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn append(&self, session_id: &str, message: ChatMessage) {
        debug!(%session_id, "MemoryStore::append: called");
        let mut sessions = self.sessions.write().await;

        let entry = sessions.entry(session_id.to_string()).or_insert_with(|| SessionEntry {
            messages: Vec::new(),
            last_used: Instant::now(),
        });
        entry.messages.push(message);
        entry.last_used = Instant::now();

        if sessions.len() > self.capacity {
            // Evict the least-recently-used session; the one just touched is
            // always newer than the eviction candidate
            if let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, e)| e.last_used)
                .map(|(id, _)| id.clone())
            {
                debug!(evicted = %oldest, "MemoryStore::append: capacity exceeded, evicting");
                sessions.remove(&oldest);
            }
        }
    }

    async fn get(&self, session_id: &str) -> Vec<ChatMessage> {
        debug!(%session_id, "MemoryStore::get: called");
        self.sessions
            .read()
            .await
            .get(session_id)
            .map(|e| e.messages.clone())
            .unwrap_or_default()
    }
}
