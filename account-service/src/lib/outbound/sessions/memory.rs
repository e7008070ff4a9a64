use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::account::errors::SessionError;
use crate::account::models::Principal;
use crate::account::ports::SessionStore;

#[derive(Debug, Clone)]
struct StoredSession {
    principal: Principal,
    expires_at: DateTime<Utc>,
}

/// Process-local session storage.
///
/// Expired sessions are never returned; they are dropped lazily on lookup and
/// swept whenever a new session is saved.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, StoredSession>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions held, including expired ones not yet swept.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save(
        &self,
        session_id: &str,
        principal: &Principal,
        expires_at: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;

        sessions.retain(|_, session| session.expires_at > now);
        sessions.insert(
            session_id.to_string(),
            StoredSession {
                principal: principal.clone(),
                expires_at,
            },
        );

        Ok(())
    }

    async fn find(&self, session_id: &str) -> Result<Option<Principal>, SessionError> {
        let now = Utc::now();

        {
            let sessions = self.sessions.read().await;
            match sessions.get(session_id) {
                None => return Ok(None),
                Some(session) if session.expires_at > now => {
                    return Ok(Some(session.principal.clone()))
                }
                Some(_) => {}
            }
        }

        self.sessions
            .write()
            .await
            .retain(|id, session| id != session_id || session.expires_at > now);
        Ok(None)
    }

    async fn remove(&self, session_id: &str) -> Result<(), SessionError> {
        self.sessions.write().await.remove(session_id);
        Ok(())
    }
}
