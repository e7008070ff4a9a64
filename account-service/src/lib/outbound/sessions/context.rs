use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtError;
use auth::SessionClaims;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::account::errors::SessionError;
use crate::account::models::Principal;
use crate::account::ports::IdentityContext;
use crate::account::ports::SessionStore;

/// What the client has to be told after the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    /// Hand the client a new session token.
    Issued {
        token: String,
        expires_at: DateTime<Utc>,
    },
    /// Tell the client to drop its session token.
    Cleared,
}

#[derive(Debug)]
enum State {
    Presented,
    Issued {
        principal: Principal,
        session_id: String,
        token: String,
        expires_at: DateTime<Utc>,
    },
    Cleared,
}

/// Identity context for a single request, backed by a signed session token
/// and a server-side session store.
///
/// Built from whatever token the request carried. After the workflow runs,
/// [`SessionIdentityContext::into_change`] says whether the client needs a new
/// token or must drop the old one.
pub struct SessionIdentityContext<S: SessionStore> {
    store: Arc<S>,
    authenticator: Arc<Authenticator>,
    ttl: Duration,
    presented: Option<String>,
    state: State,
}

impl<S: SessionStore> SessionIdentityContext<S> {
    pub fn new(
        store: Arc<S>,
        authenticator: Arc<Authenticator>,
        ttl: Duration,
        presented: Option<String>,
    ) -> Self {
        Self {
            store,
            authenticator,
            ttl,
            presented,
            state: State::Presented,
        }
    }

    /// Consume the context, returning the token change to send back.
    pub fn into_change(self) -> Option<SessionChange> {
        match self.state {
            State::Presented => None,
            State::Issued {
                token, expires_at, ..
            } => Some(SessionChange::Issued { token, expires_at }),
            State::Cleared => Some(SessionChange::Cleared),
        }
    }

    fn presented_claims(&self) -> Option<SessionClaims> {
        let token = self.presented.as_deref()?;

        match self.authenticator.validate_session(token) {
            Ok(claims) => Some(claims),
            Err(JwtError::TokenExpired) => {
                tracing::debug!("Session token expired");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Rejected session token");
                None
            }
        }
    }

    async fn presented_principal(&self) -> Result<Option<Principal>, SessionError> {
        let Some(claims) = self.presented_claims() else {
            return Ok(None);
        };

        Ok(self
            .store
            .find(&claims.sid)
            .await?
            .filter(|principal| principal.name() == claims.sub))
    }

    async fn end_presented_session(&self) -> Result<(), SessionError> {
        if let Some(claims) = self.presented_claims() {
            self.store.remove(&claims.sid).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl<S: SessionStore> IdentityContext for SessionIdentityContext<S> {
    async fn current(&self) -> Result<Option<Principal>, SessionError> {
        match &self.state {
            State::Presented => self.presented_principal().await,
            State::Issued { principal, .. } => Ok(Some(principal.clone())),
            State::Cleared => Ok(None),
        }
    }

    async fn set_authenticated(&mut self, principal: Principal) -> Result<(), SessionError> {
        // A new login never inherits the old session identifier
        self.clear().await?;

        let issued = self
            .authenticator
            .issue_session(principal.name(), self.ttl)
            .map_err(|e| SessionError::TokenIssue(e.to_string()))?;

        self.store
            .save(&issued.session_id, &principal, issued.expires_at)
            .await?;

        self.state = State::Issued {
            principal,
            session_id: issued.session_id,
            token: issued.token,
            expires_at: issued.expires_at,
        };
        Ok(())
    }

    async fn clear(&mut self) -> Result<(), SessionError> {
        match &self.state {
            State::Presented => self.end_presented_session().await?,
            State::Issued { session_id, .. } => self.store.remove(session_id).await?,
            State::Cleared => {}
        }

        self.state = State::Cleared;
        Ok(())
    }
}
