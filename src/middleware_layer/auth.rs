use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::Response,
};

use crate::{
    error::ApiResult,
    services::auth as auth_service,
    state::AppState,
};

/// A middleware that requires a valid bearer token.
///
/// On success the token's identity is inserted into the request extensions as
/// an `AuthenticatedUser`.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `request` - The incoming request.
/// * `next` - The next middleware in the chain.
///
/// # Returns
///
/// A `Response`, or a 401 `ApiError`.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> ApiResult<Response> {
    tracing::debug!("🔐 Checking authentication...");

    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let user = auth_service::verify_bearer(&state, header)?;

    tracing::debug!("✅ User authenticated: {}", user.username);

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
