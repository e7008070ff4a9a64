use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::errors::SessionError;
use crate::account::models::AuthResult;
use crate::account::models::Credentials;
use crate::account::models::Password;
use crate::account::models::Principal;
use crate::account::models::User;

/// Port for the authentication workflow.
///
/// Every modeled outcome (bad input, unknown user, wrong password, duplicate
/// username, missing session) comes back as `Ok(AuthResult)`. `Err` is
/// reserved for infrastructure failures.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Report whether the context holds a principal that resolves to a user.
    ///
    /// # Errors
    /// * `Session` - Session store unavailable
    /// * `DatabaseError` - User lookup failed
    async fn status<C>(&self, context: &C) -> Result<AuthResult, AccountError>
    where
        C: IdentityContext;

    /// Create a new account.
    ///
    /// # Arguments
    /// * `credentials` - Submitted username and password; format rules are applied here
    ///
    /// # Errors
    /// * `Credential` - Password hashing failed
    /// * `DatabaseError` - User could not be persisted
    async fn register(&self, credentials: Credentials) -> Result<AuthResult, AccountError>;

    /// Verify credentials and, on success, record the principal in the context.
    ///
    /// # Errors
    /// * `Credential` - Stored hash could not be checked
    /// * `Session` - Session could not be recorded
    /// * `DatabaseError` - User lookup failed
    async fn login<C>(
        &self,
        context: &mut C,
        credentials: Credentials,
    ) -> Result<AuthResult, AccountError>
    where
        C: IdentityContext;

    /// Clear the context's principal if it resolves to a user.
    ///
    /// # Errors
    /// * `Session` - Session store unavailable
    /// * `DatabaseError` - User lookup failed
    async fn logout<C>(&self, context: &mut C) -> Result<AuthResult, AccountError>
    where
        C: IdentityContext;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, AccountError>;

    /// Retrieve user by username.
    ///
    /// Takes the raw string so lookups never apply format rules.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AccountError>;
}

/// Hashes new passwords and checks submitted ones against stored users.
#[async_trait]
pub trait CredentialVerifier: Send + Sync + 'static {
    /// Produce the stored form of a password.
    ///
    /// # Errors
    /// * `Credential` - Hashing failed
    async fn hash(&self, password: &Password) -> Result<String, AccountError>;

    /// Check a submitted password against a user's stored hash.
    ///
    /// # Returns
    /// True if the password matches
    ///
    /// # Errors
    /// * `Credential` - Stored hash is unusable
    async fn verify(&self, user: &User, password: &Password) -> Result<bool, AccountError>;
}

/// Holder of the authenticated principal for one request.
///
/// Implementations are built per request; nothing here is global.
#[async_trait]
pub trait IdentityContext: Send + Sync {
    /// Currently authenticated principal, if any.
    async fn current(&self) -> Result<Option<Principal>, SessionError>;

    /// Record `principal` as authenticated, replacing any previous one.
    async fn set_authenticated(&mut self, principal: Principal) -> Result<(), SessionError>;

    /// Forget the current principal.
    async fn clear(&mut self) -> Result<(), SessionError>;
}

/// Server-side record of live sessions.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Record a session until `expires_at`.
    async fn save(
        &self,
        session_id: &str,
        principal: &Principal,
        expires_at: DateTime<Utc>,
    ) -> Result<(), SessionError>;

    /// Principal of a live session. Expired or unknown sessions yield `None`.
    async fn find(&self, session_id: &str) -> Result<Option<Principal>, SessionError>;

    /// End a session. Removing an unknown session is not an error.
    async fn remove(&self, session_id: &str) -> Result<(), SessionError>;
}
