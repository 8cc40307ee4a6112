//! Keyed session store standing in for the browser's key-value database.
//!
//! This module owns:
//!   - the session map, keyed by `(mode, difficulty, date)`
//!   - commit notifications for live views (`watch`)
//!
//! The store holds plain [`Session`] values; the state machine never
//! reaches in here. Every committed mutation (put, modify, delete) is
//! broadcast to subscribers. Subscribers that fall behind skip ahead —
//! the contract is last-write-visible, not a full history.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};
use tracing::{debug, instrument};

use crate::domain::{Session, SessionKey};

const EVENT_CAPACITY: usize = 64;

/// A committed mutation, as seen by subscribers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreEvent {
    Put(Session),
    Deleted(SessionKey),
}

impl StoreEvent {
    pub fn key(&self) -> SessionKey {
        match self {
            StoreEvent::Put(session) => session.key(),
            StoreEvent::Deleted(key) => *key,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    NotFound(SessionKey),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(key) => write!(
                f,
                "no session for mode={} difficulty={} date={}",
                key.mode.as_str(),
                key.difficulty.as_str(),
                key.date
            ),
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionKey, Session>>>,
    events: broadcast::Sender<StoreEvent>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            events,
        }
    }

    pub async fn get(&self, key: &SessionKey) -> Option<Session> {
        self.sessions.read().await.get(key).cloned()
    }

    /// Upsert a session under its own key.
    #[instrument(level = "debug", skip_all, fields(key = ?session.key()))]
    pub async fn put(&self, session: Session) {
        let key = session.key();
        self.sessions.write().await.insert(key, session.clone());
        debug!(target: "session", ?key, attempts = session.attempts.len(), "session committed");
        let _ = self.events.send(StoreEvent::Put(session));
    }

    /// Read-then-write mutation of an existing session. The closure runs
    /// under the write lock; keep it small.
    #[instrument(level = "debug", skip(self, mutate), fields(key = ?key))]
    pub async fn modify(
        &self,
        key: &SessionKey,
        mutate: impl FnOnce(&mut Session),
    ) -> Result<Session, StoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(key).ok_or(StoreError::NotFound(*key))?;
        mutate(session);
        let committed = session.clone();
        drop(sessions);
        let _ = self.events.send(StoreEvent::Put(committed.clone()));
        Ok(committed)
    }

    /// Remove a session. Returns whether anything was deleted.
    #[instrument(level = "debug", skip(self), fields(key = ?key))]
    pub async fn delete(&self, key: &SessionKey) -> bool {
        let removed = self.sessions.write().await.remove(key).is_some();
        if removed {
            debug!(target: "session", ?key, "session deleted");
            let _ = self.events.send(StoreEvent::Deleted(*key));
        }
        removed
    }

    /// All sessions currently on record (for statistics).
    pub async fn snapshot(&self) -> Vec<Session> {
        self.sessions.read().await.values().cloned().collect()
    }

    /// Live query on one key: yields every committed mutation from now on.
    pub fn watch(&self, key: SessionKey) -> SessionUpdates {
        SessionUpdates {
            key,
            rx: self.events.subscribe(),
        }
    }
}

/// Subscription handle returned by [`SessionStore::watch`].
pub struct SessionUpdates {
    key: SessionKey,
    rx: broadcast::Receiver<StoreEvent>,
}

impl SessionUpdates {
    /// Next committed mutation of the watched key; `None` once the store
    /// is gone. Lagged receivers skip to the most recent events.
    pub async fn next(&mut self) -> Option<StoreEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if event.key() == self.key => return Some(event),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
