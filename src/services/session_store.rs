//! Keyed storage for wizard sessions.
//!
//! Each session sits behind its own async mutex. Holding a session's lock
//! serializes calls addressed to the same token, while distinct tokens never
//! contend.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::OperationsResult;
use crate::models::WizardSession;

/// Shared handle to a single session record
pub type SessionHandle = Arc<Mutex<WizardSession>>;

/// Storage collaborator for wizard sessions. Durability and expiry are the
/// implementation's concern.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a new session and return its handle
    async fn insert(&self, session: WizardSession) -> OperationsResult<SessionHandle>;

    /// Look up a session by token
    async fn get(&self, token: &str) -> OperationsResult<Option<SessionHandle>>;
}

/// In-process session store backed by a concurrent map
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, SessionHandle>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: WizardSession) -> OperationsResult<SessionHandle> {
        let token = session.session_token.clone();
        let handle = Arc::new(Mutex::new(session));
        self.sessions.insert(token, Arc::clone(&handle));
        Ok(handle)
    }

    async fn get(&self, token: &str) -> OperationsResult<Option<SessionHandle>> {
        Ok(self
            .sessions
            .get(token)
            .map(|entry| Arc::clone(entry.value())))
    }
}
