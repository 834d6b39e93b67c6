//! Session record storage.

use crate::auth::AuthError;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use ulid::Ulid;

/// Creates, restores, and destroys session records keyed by identifier.
///
/// The middleware treats the identifier as an opaque string; its only
/// requirement is that `restore_session` round-trips what
/// `create_session` returned while the session is alive.
#[async_trait]
pub trait SessionManager: Send + Sync {
    /// Create a session for an account and return its identifier.
    async fn create_session(&self, account_id: &str) -> Result<String, AuthError>;

    /// Resolve a session identifier back to its account id.
    async fn restore_session(&self, session_id: &str) -> Result<String, AuthError>;

    /// Destroy a session. Destroying an unknown identifier is a no-op.
    async fn destroy_session(&self, session_id: &str);
}

/// In-memory session store with ULID identifiers.
///
/// Sessions live until destroyed or the store is dropped; there is no
/// expiry. Safe to share across concurrent requests.
#[derive(Default)]
pub struct MemorySessionManager {
    sessions: RwLock<HashMap<String, String>>,
}

impl MemorySessionManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionManager for MemorySessionManager {
    async fn create_session(&self, account_id: &str) -> Result<String, AuthError> {
        let session_id = Ulid::new().to_string();
        self.sessions
            .write()
            .insert(session_id.clone(), account_id.to_string());
        Ok(session_id)
    }

    async fn restore_session(&self, session_id: &str) -> Result<String, AuthError> {
        self.sessions
            .read()
            .get(session_id)
            .cloned()
            .ok_or(AuthError::UnknownSession)
    }

    async fn destroy_session(&self, session_id: &str) {
        self.sessions.write().remove(session_id);
    }
}
