use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::account::errors::MissingCredentials;
use crate::account::errors::PasswordFormatError;
use crate::account::errors::RegistrationError;
use crate::account::errors::UsernameError;

/// User aggregate entity.
///
/// Carries the stored password hash, so it never leaves the service as-is;
/// callers get a [`UserProfile`] instead.
#[derive(Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a new user record from a validated username and a password hash.
    pub fn new(username: Username, password_hash: String) -> Self {
        Self {
            id: UserId::new(),
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }

    /// Secret-free view of the user.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            created_at: self.created_at,
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// User as exposed to callers: everything except the stored secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub username: Username,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 1-15 characters long. Length is counted in characters,
/// not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub const MIN_LENGTH: usize = 1;
    pub const MAX_LENGTH: usize = 15;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username is empty
    /// * `TooLong` - Username longer than 15 characters
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(username))
        }
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password as submitted by a client.
///
/// Lives only for the duration of a register or login call. `Debug` never
/// prints the value.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    pub const MIN_LENGTH: usize = 6;
    pub const MAX_LENGTH: usize = 15;

    /// Wrap a submitted password without format checks (login path).
    pub fn new(password: String) -> Self {
        Self(password)
    }

    /// Wrap a password chosen at registration, enforcing 6-15 characters.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 6 characters
    /// * `TooLong` - More than 15 characters
    pub fn for_registration(password: String) -> Result<Self, PasswordFormatError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            Err(PasswordFormatError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(PasswordFormatError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(password))
        }
    }

    /// Plaintext value, for handing to the hasher only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Username and password pair, both known to be present.
///
/// No format rules are applied here: login accepts whatever was submitted,
/// registration narrows it further with [`Credentials::into_registration`].
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password: Password,
}

impl Credentials {
    pub fn new(username: String, password: Password) -> Self {
        Self { username, password }
    }

    /// Build credentials from optional request fields.
    ///
    /// # Errors
    /// * `MissingCredentials` - Either field is absent
    pub fn from_parts(
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self, MissingCredentials> {
        match (username, password) {
            (Some(username), Some(password)) => Ok(Self::new(username, Password::new(password))),
            _ => Err(MissingCredentials),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Apply registration format rules. The username is checked first.
    ///
    /// # Errors
    /// * `InvalidUsername` - Username length outside 1-15
    /// * `InvalidPassword` - Password length outside 6-15
    pub fn into_registration(self) -> Result<RegisterCommand, RegistrationError> {
        let username = Username::new(self.username)?;
        let password = Password::for_registration(self.password.0)?;
        Ok(RegisterCommand { username, password })
    }
}

/// Command to register a new account with format-checked fields.
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub password: Password,
}

/// The identity recorded for an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Principal {
    name: String,
}

impl Principal {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self::new(user.username.as_str())
    }
}

/// Human-readable outcome carried by every [`AuthResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMessage {
    NotLoggedIn,
    LoggedIn,
    CredentialsMissing,
    InvalidUsername,
    InvalidPassword,
    UserAlreadyExists,
    Registered,
    UserNotFound,
    IncorrectPassword,
    LoginSuccessful,
    LogoutSuccessful,
}

impl AuthMessage {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMessage::NotLoggedIn => "not logged in",
            AuthMessage::LoggedIn => "logged in",
            AuthMessage::CredentialsMissing => "username or password missing",
            AuthMessage::InvalidUsername => "invalid username format",
            AuthMessage::InvalidPassword => "invalid password format",
            AuthMessage::UserAlreadyExists => "user already exists",
            AuthMessage::Registered => "success",
            AuthMessage::UserNotFound => "user does not exist",
            AuthMessage::IncorrectPassword => "incorrect password",
            AuthMessage::LoginSuccessful => "login successful",
            AuthMessage::LogoutSuccessful => "logout successful",
        }
    }
}

impl fmt::Display for AuthMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform result of every authentication operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    pub ok: bool,
    pub logged_in: bool,
    pub message: AuthMessage,
    pub user: Option<UserProfile>,
}

impl AuthResult {
    /// Rejected operation.
    pub fn failure(message: AuthMessage) -> Self {
        Self {
            ok: false,
            logged_in: false,
            message,
            user: None,
        }
    }

    /// Successful operation that leaves the caller without a session.
    pub fn anonymous(message: AuthMessage) -> Self {
        Self {
            ok: true,
            logged_in: false,
            message,
            user: None,
        }
    }

    /// Successful operation for an authenticated caller.
    pub fn authenticated(message: AuthMessage, user: UserProfile) -> Self {
        Self {
            ok: true,
            logged_in: true,
            message,
            user: Some(user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_length_bounds() {
        assert_eq!(
            Username::new(String::new()),
            Err(UsernameError::TooShort { min: 1, actual: 0 })
        );
        assert!(Username::new("a".to_string()).is_ok());
        assert!(Username::new("a".repeat(15)).is_ok());
        assert_eq!(
            Username::new("a".repeat(16)),
            Err(UsernameError::TooLong {
                max: 15,
                actual: 16
            })
        );
    }

    #[test]
    fn test_username_counts_characters() {
        // 15 characters, 45 bytes
        assert!(Username::new("é".repeat(15)).is_ok());
        assert!(Username::new("用".repeat(15)).is_ok());
        assert!(Username::new("用".repeat(16)).is_err());
    }

    #[test]
    fn test_password_length_bounds() {
        assert_eq!(
            Password::for_registration("12345".to_string()).unwrap_err(),
            PasswordFormatError::TooShort { min: 6, actual: 5 }
        );
        assert!(Password::for_registration("123456".to_string()).is_ok());
        assert!(Password::for_registration("1".repeat(15)).is_ok());
        assert_eq!(
            Password::for_registration("1".repeat(16)).unwrap_err(),
            PasswordFormatError::TooLong {
                max: 15,
                actual: 16
            }
        );
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("hunter22".to_string());
        let rendered = format!("{:?}", password);
        assert!(!rendered.contains("hunter22"));

        let credentials = Credentials::new("alice".to_string(), password);
        assert!(!format!("{:?}", credentials).contains("hunter22"));
    }

    #[test]
    fn test_user_debug_hides_hash() {
        let user = User::new(
            Username::new("alice".to_string()).unwrap(),
            "$argon2id$v=19$secret_hash".to_string(),
        );
        assert!(!format!("{:?}", user).contains("secret_hash"));
    }

    #[test]
    fn test_credentials_from_parts() {
        assert!(Credentials::from_parts(Some("ab".into()), Some("secret1".into())).is_ok());
        assert_eq!(
            Credentials::from_parts(None, Some("secret1".into())).unwrap_err(),
            MissingCredentials
        );
        assert_eq!(
            Credentials::from_parts(Some("ab".into()), None).unwrap_err(),
            MissingCredentials
        );
    }

    #[test]
    fn test_login_credentials_skip_format_rules() {
        let credentials =
            Credentials::from_parts(Some("x".repeat(40)), Some("1".into())).unwrap();
        assert_eq!(credentials.username().len(), 40);
        assert_eq!(credentials.password().expose(), "1");
    }

    #[test]
    fn test_into_registration_checks_username_first() {
        let credentials = Credentials::new(String::new(), Password::new("1".to_string()));
        assert!(matches!(
            credentials.into_registration(),
            Err(RegistrationError::InvalidUsername(_))
        ));

        let credentials = Credentials::new("ab".to_string(), Password::new("1".to_string()));
        assert!(matches!(
            credentials.into_registration(),
            Err(RegistrationError::InvalidPassword(_))
        ));
    }

    #[test]
    fn test_profile_matches_user() {
        let user = User::new(
            Username::new("alice".to_string()).unwrap(),
            "$argon2id$hash".to_string(),
        );
        let profile = user.profile();

        assert_eq!(profile.id, user.id);
        assert_eq!(profile.username, user.username);
        assert_eq!(profile.created_at, user.created_at);
    }

    #[test]
    fn test_auth_result_constructors() {
        let failure = AuthResult::failure(AuthMessage::IncorrectPassword);
        assert!(!failure.ok && !failure.logged_in && failure.user.is_none());

        let anonymous = AuthResult::anonymous(AuthMessage::NotLoggedIn);
        assert!(anonymous.ok && !anonymous.logged_in);

        let user = User::new(Username::new("ab".to_string()).unwrap(), String::new());
        let authenticated = AuthResult::authenticated(AuthMessage::LoggedIn, user.profile());
        assert!(authenticated.ok && authenticated.logged_in);
        assert_eq!(authenticated.user, Some(user.profile()));
    }
}
