use axum::extract::State;
use axum::Json;
use axum_extra::extract::CookieJar;

use super::ApiError;
use super::AuthResultBody;
use crate::account::ports::AuthServicePort;
use crate::account::ports::SessionStore;
use crate::account::ports::UserRepository;
use crate::inbound::http::router::AppState;

pub async fn status<R, S>(
    State(state): State<AppState<R, S>>,
    jar: CookieJar,
) -> Result<Json<AuthResultBody>, ApiError>
where
    R: UserRepository,
    S: SessionStore,
{
    let context = state.sessions.context(&jar);
    let result = state.auth_service.status(&context).await?;

    Ok(Json((&result).into()))
}
