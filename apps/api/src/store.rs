//! In-memory session storage.
//!
//! One `Session` per editing collaborator: the template text plus the
//! placeholder registry being built. Nothing is persisted; dropping the
//! process drops every session, which is the documented lifetime.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::merge::registry::Registry;

/// One editing session. Owned exclusively by the collaborator that created
/// it; there is no cross-session sharing.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub template: String,
    pub registry: Registry,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Maps session id to its owned `Session`. Cheap to clone; all clones share
/// the same map.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty session and returns a copy of it.
    pub fn create(&self) -> Session {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            template: String::new(),
            registry: Registry::new(),
            created_at: now,
            updated_at: now,
        };
        self.write().insert(session.id, session.clone());
        session
    }

    /// Returns a copy of the session, or `None` for an unknown id.
    pub fn get(&self, id: Uuid) -> Option<Session> {
        self.read().get(&id).cloned()
    }

    /// Runs `f` on the session under the write lock and bumps `updated_at`.
    /// Returns `None` for an unknown id. `f` must not block.
    pub fn with_session<T>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> T) -> Option<T> {
        let mut sessions = self.write();
        let session = sessions.get_mut(&id)?;
        let result = f(session);
        session.updated_at = Utc::now();
        Some(result)
    }

    /// Drops the session. Returns false for an unknown id.
    pub fn remove(&self, id: Uuid) -> bool {
        self.write().remove(&id).is_some()
    }

    // Take the guard even if a previous holder panicked.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<Uuid, Session>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Uuid, Session>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}
