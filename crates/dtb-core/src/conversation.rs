//! Bounded per-channel translation history.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{
    domain::ChannelId,
    model::types::{ConversationEntry, Role},
};

pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// A source channel translated into one target language.
///
/// The system prompt names both languages, so each target gets its own log.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConversationKey {
    pub source: ChannelId,
    pub target_language: String,
}

impl ConversationKey {
    pub fn new(source: ChannelId, target_language: impl Into<String>) -> Self {
        Self {
            source,
            target_language: target_language.into(),
        }
    }
}

/// Ordered log capped at `capacity` entries.
///
/// A system entry at index 0 is never evicted; the oldest non-system entries
/// go first.
#[derive(Clone, Debug)]
pub struct ConversationBuffer {
    capacity: usize,
    entries: Vec<ConversationEntry>,
}

impl ConversationBuffer {
    /// `capacity` is clamped to 2 so a system prompt always leaves room for a turn.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(2),
            entries: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn has_system(&self) -> bool {
        self.entries
            .first()
            .map(|e| e.role == Role::System)
            .unwrap_or(false)
    }

    /// Install `prompt` as the leading system entry if there is none yet.
    /// Returns whether it was installed.
    pub fn ensure_initialized(&mut self, prompt: &str) -> bool {
        if self.has_system() {
            return false;
        }
        self.entries.insert(0, ConversationEntry::system(prompt));
        self.truncate();
        true
    }

    pub fn push(&mut self, entry: ConversationEntry) {
        self.entries.push(entry);
        self.truncate();
    }

    /// Remove the newest entry if it is an unanswered user turn.
    pub fn discard_pending_user(&mut self) -> Option<ConversationEntry> {
        match self.entries.last() {
            Some(e) if e.role == Role::User => self.entries.pop(),
            _ => None,
        }
    }

    fn truncate(&mut self) {
        if self.entries.len() <= self.capacity {
            return;
        }
        let excess = self.entries.len() - self.capacity;
        let start = usize::from(self.has_system());
        self.entries.drain(start..start + excess);
    }
}

/// Process-wide conversation store.
///
/// Each key owns its own async mutex (same shape as a per-chat lock map), so
/// callers can hold one buffer across a model call without blocking other
/// channels. Keys are never evicted.
pub struct ConversationStore {
    capacity: usize,
    inner: Mutex<HashMap<ConversationKey, Arc<Mutex<ConversationBuffer>>>>,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl ConversationStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Lock the buffer for `key`, creating it on first use.
    pub async fn lock(&self, key: &ConversationKey) -> OwnedMutexGuard<ConversationBuffer> {
        let buffer = {
            let mut map = self.inner.lock().await;
            map.entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(ConversationBuffer::new(self.capacity))))
                .clone()
        };
        buffer.lock_owned().await
    }

    pub async fn ensure_initialized(&self, key: &ConversationKey, system_prompt: &str) -> bool {
        self.lock(key).await.ensure_initialized(system_prompt)
    }

    pub async fn append(&self, key: &ConversationKey, entry: ConversationEntry) {
        self.lock(key).await.push(entry);
    }

    /// Snapshot of the log; empty for unknown keys.
    pub async fn get(&self, key: &ConversationKey) -> Vec<ConversationEntry> {
        let buffer = {
            let map = self.inner.lock().await;
            map.get(key).cloned()
        };
        match buffer {
            Some(b) => b.lock().await.entries().to_vec(),
            None => Vec::new(),
        }
    }

    pub async fn key_count(&self) -> usize {
        self.inner.lock().await.len()
    }
}
