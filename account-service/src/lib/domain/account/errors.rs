use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for registration password format failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordFormatError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Password too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for registration input that fails format rules
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordFormatError),
}

/// Username or password absent from the request
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Username or password missing")]
pub struct MissingCredentials;

/// Error for session bookkeeping
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Failed to issue session token: {0}")]
    TokenIssue(String),

    #[error("Session store error: {0}")]
    Store(String),
}

/// Top-level error for account operations.
///
/// Only infrastructure failures end up here; rejected input, unknown users and
/// wrong passwords are ordinary [`AuthResult`](super::models::AuthResult)s.
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Credential backend error: {0}")]
    Credential(String),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
