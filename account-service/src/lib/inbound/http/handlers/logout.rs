use axum::extract::State;
use axum::Json;
use axum_extra::extract::CookieJar;

use super::ApiError;
use super::AuthResultBody;
use crate::account::ports::AuthServicePort;
use crate::account::ports::SessionStore;
use crate::account::ports::UserRepository;
use crate::inbound::http::router::AppState;

pub async fn logout<R, S>(
    State(state): State<AppState<R, S>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<AuthResultBody>), ApiError>
where
    R: UserRepository,
    S: SessionStore,
{
    let mut context = state.sessions.context(&jar);
    let result = state.auth_service.logout(&mut context).await?;
    let jar = state.sessions.apply(jar, context.into_change());

    Ok((jar, Json((&result).into())))
}
