use std::sync::Arc;

use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::errors::RegistrationError;
use crate::account::models::AuthMessage;
use crate::account::models::AuthResult;
use crate::account::models::Credentials;
use crate::account::models::Principal;
use crate::account::models::User;
use crate::account::ports::AuthServicePort;
use crate::account::ports::CredentialVerifier;
use crate::account::ports::IdentityContext;
use crate::account::ports::UserRepository;

/// Domain service implementation of the authentication workflow.
///
/// Holds no mutable state; users live in the repository and the current
/// principal lives in the per-request identity context.
pub struct AuthService<UR, CV>
where
    UR: UserRepository,
    CV: CredentialVerifier,
{
    repository: Arc<UR>,
    verifier: Arc<CV>,
}

impl<UR, CV> AuthService<UR, CV>
where
    UR: UserRepository,
    CV: CredentialVerifier,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `verifier` - Password hashing and verification implementation
    pub fn new(repository: Arc<UR>, verifier: Arc<CV>) -> Self {
        Self {
            repository,
            verifier,
        }
    }

    async fn resolve<C>(&self, context: &C) -> Result<Option<User>, AccountError>
    where
        C: IdentityContext,
    {
        match context.current().await? {
            Some(principal) => self.repository.find_by_username(principal.name()).await,
            None => Ok(None),
        }
    }
}

#[async_trait]
impl<UR, CV> AuthServicePort for AuthService<UR, CV>
where
    UR: UserRepository,
    CV: CredentialVerifier,
{
    async fn status<C>(&self, context: &C) -> Result<AuthResult, AccountError>
    where
        C: IdentityContext,
    {
        Ok(match self.resolve(context).await? {
            Some(user) => AuthResult::authenticated(AuthMessage::LoggedIn, user.profile()),
            None => AuthResult::anonymous(AuthMessage::NotLoggedIn),
        })
    }

    async fn register(&self, credentials: Credentials) -> Result<AuthResult, AccountError> {
        let command = match credentials.into_registration() {
            Ok(command) => command,
            Err(RegistrationError::InvalidUsername(e)) => {
                tracing::debug!(reason = %e, "Registration rejected");
                return Ok(AuthResult::failure(AuthMessage::InvalidUsername));
            }
            Err(RegistrationError::InvalidPassword(e)) => {
                tracing::debug!(reason = %e, "Registration rejected");
                return Ok(AuthResult::failure(AuthMessage::InvalidPassword));
            }
        };

        let password_hash = self.verifier.hash(&command.password).await?;
        let user = User::new(command.username, password_hash);

        match self.repository.create(user).await {
            Ok(created_user) => {
                tracing::info!(
                    user_id = %created_user.id,
                    username = %created_user.username,
                    "User registered"
                );
                Ok(AuthResult::anonymous(AuthMessage::Registered))
            }
            Err(AccountError::UsernameAlreadyExists(username)) => {
                tracing::debug!(username = %username, "Registration rejected: username taken");
                Ok(AuthResult::failure(AuthMessage::UserAlreadyExists))
            }
            Err(e) => Err(e),
        }
    }

    async fn login<C>(
        &self,
        context: &mut C,
        credentials: Credentials,
    ) -> Result<AuthResult, AccountError>
    where
        C: IdentityContext,
    {
        let Some(user) = self
            .repository
            .find_by_username(credentials.username())
            .await?
        else {
            return Ok(AuthResult::failure(AuthMessage::UserNotFound));
        };

        if !self.verifier.verify(&user, credentials.password()).await? {
            tracing::debug!(username = %user.username, "Login rejected: incorrect password");
            return Ok(AuthResult::failure(AuthMessage::IncorrectPassword));
        }

        context.set_authenticated(Principal::from(&user)).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "User logged in");

        Ok(AuthResult::authenticated(
            AuthMessage::LoginSuccessful,
            user.profile(),
        ))
    }

    async fn logout<C>(&self, context: &mut C) -> Result<AuthResult, AccountError>
    where
        C: IdentityContext,
    {
        let Some(user) = self.resolve(&*context).await? else {
            return Ok(AuthResult::failure(AuthMessage::NotLoggedIn));
        };

        context.clear().await?;
        tracing::info!(user_id = %user.id, username = %user.username, "User logged out");

        Ok(AuthResult::anonymous(AuthMessage::LogoutSuccessful))
    }
}
