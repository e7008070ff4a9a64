use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::account::errors::AccountError;
use crate::account::errors::MissingCredentials;
use crate::account::models::AuthResult;
use crate::account::models::Credentials;
use crate::account::models::UserProfile;

pub mod login;
pub mod logout;
pub mod register;
pub mod status;

const INTERNAL_SERVER_ERROR_MESSAGE: &str = "internal server error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        ApiError::InternalServerError(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InternalServerError(cause) => {
                tracing::error!(error = %cause, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(AuthResultBody::internal_error()),
                )
                    .into_response()
            }
        }
    }
}

/// Wire form of an [`AuthResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResultBody {
    pub ok: bool,
    pub is_logged_in: bool,
    pub message: String,
    pub user: Option<UserData>,
}

impl AuthResultBody {
    fn internal_error() -> Self {
        Self {
            ok: false,
            is_logged_in: false,
            message: INTERNAL_SERVER_ERROR_MESSAGE.to_string(),
            user: None,
        }
    }
}

impl From<&AuthResult> for AuthResultBody {
    fn from(result: &AuthResult) -> Self {
        Self {
            ok: result.ok,
            is_logged_in: result.logged_in,
            message: result.message.to_string(),
            user: result.user.as_ref().map(UserData::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<&UserProfile> for UserData {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            username: profile.username.as_str().to_string(),
            created_at: profile.created_at,
        }
    }
}

/// HTTP request body for register and login (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialsRequest {
    username: Option<String>,
    password: Option<String>,
}

impl CredentialsRequest {
    /// Turn whatever the client sent into credentials.
    ///
    /// A body that could not be read as JSON counts the same as one with
    /// missing fields.
    fn parse(
        payload: Result<Json<CredentialsRequest>, JsonRejection>,
    ) -> Result<Credentials, MissingCredentials> {
        match payload {
            Ok(Json(body)) => Credentials::from_parts(body.username, body.password),
            Err(rejection) => {
                tracing::debug!(reason = %rejection, "Unreadable credentials body");
                Err(MissingCredentials)
            }
        }
    }
}
