use chrono::DateTime;
use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Claims carried by a session token.
///
/// `sid` names the server-side session record. A token is only as good as
/// that record: once the session is removed the token stops authenticating
/// even though its signature and expiry are still valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject (authenticated username)
    pub sub: String,

    /// Session identifier
    pub sid: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims for a fresh session with a random identifier.
    ///
    /// # Arguments
    /// * `subject` - Username the session belongs to
    /// * `ttl` - Session lifetime
    pub fn new(subject: impl ToString, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.to_string(),
            sid: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Expiration as a UTC timestamp.
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let claims = SessionClaims::new("alice", Duration::minutes(30));

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
        assert!(Uuid::parse_str(&claims.sid).is_ok());
    }

    #[test]
    fn test_session_ids_are_unique() {
        let first = SessionClaims::new("alice", Duration::minutes(30));
        let second = SessionClaims::new("alice", Duration::minutes(30));
        assert_ne!(first.sid, second.sid);
    }

    #[test]
    fn test_expires_at() {
        let claims = SessionClaims {
            sub: "alice".to_string(),
            sid: "sid".to_string(),
            iat: 0,
            exp: 1_700_000_000,
        };
        assert_eq!(claims.expires_at().timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_claims_wire_format() {
        let claims = SessionClaims {
            sub: "alice".to_string(),
            sid: "sid".to_string(),
            iat: 10,
            exp: 20,
        };

        assert_eq!(
            serde_json::to_value(&claims).unwrap(),
            serde_json::json!({ "sub": "alice", "sid": "sid", "iat": 10, "exp": 20 })
        );
    }
}
