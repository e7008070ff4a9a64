use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use axum_extra::extract::CookieJar;

use super::ApiError;
use super::AuthResultBody;
use super::CredentialsRequest;
use crate::account::models::AuthMessage;
use crate::account::models::AuthResult;
use crate::account::ports::AuthServicePort;
use crate::account::ports::SessionStore;
use crate::account::ports::UserRepository;
use crate::inbound::http::router::AppState;

pub async fn login<R, S>(
    State(state): State<AppState<R, S>>,
    jar: CookieJar,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<AuthResultBody>), ApiError>
where
    R: UserRepository,
    S: SessionStore,
{
    let Ok(credentials) = CredentialsRequest::parse(payload) else {
        let result = AuthResult::failure(AuthMessage::CredentialsMissing);
        return Ok((jar, Json((&result).into())));
    };

    let mut context = state.sessions.context(&jar);
    let result = state.auth_service.login(&mut context, credentials).await?;
    let jar = state.sessions.apply(jar, context.into_change());

    Ok((jar, Json((&result).into())))
}
