use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::register::register;
use super::handlers::status::status;
use super::session::SessionCookies;
use crate::account::ports::SessionStore;
use crate::account::ports::UserRepository;
use crate::account::service::AuthService;
use crate::outbound::credentials::Argon2CredentialVerifier;

pub struct AppState<R: UserRepository, S: SessionStore> {
    pub auth_service: Arc<AuthService<R, Argon2CredentialVerifier>>,
    pub sessions: SessionCookies<S>,
}

impl<R: UserRepository, S: SessionStore> Clone for AppState<R, S> {
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
            sessions: self.sessions.clone(),
        }
    }
}

pub fn create_router<R, S>(
    auth_service: Arc<AuthService<R, Argon2CredentialVerifier>>,
    sessions: SessionCookies<S>,
) -> Router
where
    R: UserRepository,
    S: SessionStore,
{
    let state = AppState {
        auth_service,
        sessions,
    };

    let auth_routes = Router::new()
        .route("/auth", get(status::<R, S>))
        .route("/auth/register", post(register::<R, S>))
        .route("/auth/login", post(login::<R, S>))
        .route("/auth/logout", get(logout::<R, S>).post(logout::<R, S>));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(auth_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
