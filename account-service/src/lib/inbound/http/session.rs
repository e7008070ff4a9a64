use std::sync::Arc;

use auth::Authenticator;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use axum_extra::extract::CookieJar;
use chrono::Duration;

use crate::account::ports::SessionStore;
use crate::outbound::sessions::SessionChange;
use crate::outbound::sessions::SessionIdentityContext;

pub const DEFAULT_COOKIE_NAME: &str = "SESSION";

/// How the session cookie is named and scoped.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub cookie_name: String,
    pub secure: bool,
    pub ttl: Duration,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            secure: false,
            ttl: Duration::minutes(30),
        }
    }
}

/// Bridges the session cookie and the per-request identity context.
pub struct SessionCookies<S: SessionStore> {
    store: Arc<S>,
    authenticator: Arc<Authenticator>,
    settings: CookieSettings,
}

impl<S: SessionStore> Clone for SessionCookies<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            authenticator: Arc::clone(&self.authenticator),
            settings: self.settings.clone(),
        }
    }
}

impl<S: SessionStore> SessionCookies<S> {
    pub fn new(store: Arc<S>, authenticator: Arc<Authenticator>, settings: CookieSettings) -> Self {
        Self {
            store,
            authenticator,
            settings,
        }
    }

    /// Identity context for a request carrying `jar`.
    pub fn context(&self, jar: &CookieJar) -> SessionIdentityContext<S> {
        let presented = jar
            .get(&self.settings.cookie_name)
            .map(|cookie| cookie.value().to_string());

        SessionIdentityContext::new(
            Arc::clone(&self.store),
            Arc::clone(&self.authenticator),
            self.settings.ttl,
            presented,
        )
    }

    /// Reflect a session change in the response cookies.
    pub fn apply(&self, jar: CookieJar, change: Option<SessionChange>) -> CookieJar {
        match change {
            None => jar,
            Some(SessionChange::Issued { token, expires_at }) => {
                tracing::debug!(expires_at = %expires_at, "Setting session cookie");
                jar.add(self.cookie(token))
            }
            Some(SessionChange::Cleared) => jar.remove(self.cookie(String::new())),
        }
    }

    fn cookie(&self, value: String) -> Cookie<'static> {
        Cookie::build((self.settings.cookie_name.clone(), value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.settings.secure)
            .build()
    }
}
