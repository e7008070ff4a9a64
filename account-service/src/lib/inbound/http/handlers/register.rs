use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use super::ApiError;
use super::AuthResultBody;
use super::CredentialsRequest;
use crate::account::models::AuthMessage;
use crate::account::models::AuthResult;
use crate::account::ports::AuthServicePort;
use crate::account::ports::SessionStore;
use crate::account::ports::UserRepository;
use crate::inbound::http::router::AppState;

pub async fn register<R, S>(
    State(state): State<AppState<R, S>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<AuthResultBody>, ApiError>
where
    R: UserRepository,
    S: SessionStore,
{
    let result = match CredentialsRequest::parse(payload) {
        Ok(credentials) => state.auth_service.register(credentials).await?,
        Err(_) => AuthResult::failure(AuthMessage::CredentialsMissing),
    };

    Ok(Json((&result).into()))
}
