use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use tokio::task;

use crate::account::errors::AccountError;
use crate::account::models::Password;
use crate::account::models::User;
use crate::account::ports::CredentialVerifier;

/// Argon2id-backed credential verifier from the auth library.
pub struct Argon2CredentialVerifier {
    authenticator: Arc<Authenticator>,
}

impl Argon2CredentialVerifier {
    pub fn new(authenticator: Arc<Authenticator>) -> Self {
        Self { authenticator }
    }
}

#[async_trait]
impl CredentialVerifier for Argon2CredentialVerifier {
    async fn hash(&self, password: &Password) -> Result<String, AccountError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = password.clone();

        // Argon2 runs on the blocking pool
        task::spawn_blocking(move || authenticator.hash_password(password.expose()))
            .await
            .map_err(|e| AccountError::Credential(e.to_string()))?
            .map_err(|e| AccountError::Credential(e.to_string()))
    }

    async fn verify(&self, user: &User, password: &Password) -> Result<bool, AccountError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = password.clone();
        let password_hash = user.password_hash.clone();

        let outcome = task::spawn_blocking(move || {
            authenticator.verify_password(password.expose(), &password_hash)
        })
        .await
        .map_err(|e| AccountError::Credential(e.to_string()))?;

        match outcome {
            Ok(()) => Ok(true),
            Err(AuthenticationError::InvalidCredentials) => Ok(false),
            Err(AuthenticationError::PasswordError(e)) => {
                tracing::error!(user_id = %user.id, error = %e, "Stored password hash is unusable");
                Err(AccountError::Credential(e.to_string()))
            }
        }
    }
}
