//! Authentication utilities library
//!
//! Reusable authentication infrastructure for the account service:
//! - Password hashing (Argon2id, configurable cost)
//! - Signed session tokens (HS256)
//! - Authentication coordination
//!
//! Services define their own authentication ports and adapt these
//! implementations behind them.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! let session = auth.issue_session("alice", Duration::minutes(30)).unwrap();
//! let claims = auth.validate_session(&session.token).unwrap();
//! assert_eq!(claims.sub, "alice");
//! assert_eq!(claims.sid, session.session_id);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::IssuedSession;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SessionClaims;
pub use password::HashingParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
