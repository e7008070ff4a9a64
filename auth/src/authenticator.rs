use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::SessionClaims;
use crate::password::HashingParams;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and session tokens.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// A freshly issued session token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// Signed token to hand to the client
    pub token: String,
    /// Server-side session identifier embedded in the token
    pub session_id: String,
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),
}

impl Authenticator {
    /// Create a new authenticator with default hashing parameters.
    ///
    /// # Arguments
    /// * `token_secret` - Secret key for signing session tokens
    pub fn new(token_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(token_secret),
        }
    }

    /// Create a new authenticator with explicit hashing parameters.
    ///
    /// # Errors
    /// * `PasswordError::InvalidParams` - Hashing parameters are rejected by Argon2
    pub fn with_hashing(token_secret: &[u8], params: HashingParams) -> Result<Self, PasswordError> {
        Ok(Self {
            password_hasher: PasswordHasher::with_params(params)?,
            jwt_handler: JwtHandler::new(token_secret),
        })
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a submitted password against a stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        if self.password_hasher.verify(password, stored_hash)? {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Issue a signed session token for a subject.
    ///
    /// # Arguments
    /// * `subject` - Authenticated username
    /// * `ttl` - Session lifetime
    pub fn issue_session(&self, subject: &str, ttl: Duration) -> Result<IssuedSession, JwtError> {
        let claims = SessionClaims::new(subject, ttl);
        let token = self.jwt_handler.encode(&claims)?;

        Ok(IssuedSession {
            token,
            expires_at: claims.expires_at(),
            session_id: claims.sid,
        })
    }

    /// Validate a session token and return its claims.
    ///
    /// Only checks signature and expiry; whether the session is still live
    /// is up to the caller's session store.
    pub fn validate_session(&self, token: &str) -> Result<SessionClaims, JwtError> {
        self.jwt_handler.decode(token)
    }
}
