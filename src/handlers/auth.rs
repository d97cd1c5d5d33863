use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiResult, WithMessage},
    extract::JsonBody,
    services::auth as auth_service,
    state::AppState,
};

/// The request payload for registration and login.
///
/// Fields are optional so that a missing field is reported as a validation
/// error rather than a body rejection.
#[derive(Deserialize, Default)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl std::fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// The response payload for registration.
#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub username: String,
}

/// The response payload for login.
#[derive(Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub username: String,
    pub token: String,
}

/// Handles user registration.
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CredentialsRequest>,
) -> ApiResult<Response> {
    tracing::info!("📝 Register attempt - Payload: {:?}", payload);

    let username = auth_service::register(&state, payload.username, payload.password)
        .await
        .with_message("Registration failed")?;

    let response = RegisterResponse {
        message: "User registered successfully",
        username,
    };

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// Handles user login.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CredentialsRequest>,
) -> ApiResult<Response> {
    tracing::info!("🔐 Login attempt - Payload: {:?}", payload);

    let grant = auth_service::login(&state, payload.username, payload.password)
        .await
        .with_message("Login failed")?;

    let response = LoginResponse {
        message: "Login successful",
        username: grant.username,
        token: grant.token,
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}
