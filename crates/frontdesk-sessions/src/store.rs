use std::sync::Arc;

use chrono::{DateTime, Local};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use frontdesk_core::UserAddress;

use crate::types::Session;

/// Shared handle to one contact's session. Holding the lock is what
/// serializes that contact's messages.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Concurrent in-memory map of contact → session.
///
/// The map itself is sharded (`DashMap`) so lookups for different contacts
/// never contend. Each entry carries its own `tokio::sync::Mutex`; that lock
/// is FIFO, so messages from one contact are applied in arrival order.
/// Entries live until the process exits.
pub struct SessionStore {
    sessions: DashMap<UserAddress, SessionHandle>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Return the contact's session handle, creating a `Menu` session stamped
    /// `now` on first contact.
    ///
    /// The map guard is released before returning; callers lock the handle.
    #[instrument(skip(self), fields(user = %user))]
    pub fn get_or_create(&self, user: &UserAddress, now: DateTime<Local>) -> SessionHandle {
        let entry = self.sessions.entry(user.clone()).or_insert_with(|| {
            debug!("creating session");
            Arc::new(Mutex::new(Session::new(now)))
        });
        Arc::clone(entry.value())
    }

    /// Overwrite the contact's session with a fresh one, in place, so that
    /// tasks already waiting on the handle see the new record.
    #[instrument(skip(self), fields(user = %user))]
    pub async fn reset(&self, user: &UserAddress, now: DateTime<Local>) {
        let handle = self.get_or_create(user, now);
        handle.lock().await.reset(now);
    }

    /// Run `f` against the contact's session while holding its lock.
    pub async fn update<R>(
        &self,
        user: &UserAddress,
        now: DateTime<Local>,
        f: impl FnOnce(&mut Session) -> R,
    ) -> R {
        let handle = self.get_or_create(user, now);
        let mut session = handle.lock().await;
        f(&mut session)
    }

    /// Copy of the contact's session, if one exists. Waits for any in-flight
    /// message of that contact to finish.
    pub async fn snapshot(&self, user: &UserAddress) -> Option<Session> {
        let handle = self.sessions.get(user).map(|e| Arc::clone(e.value()))?;
        let session = handle.lock().await;
        Some(session.clone())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
