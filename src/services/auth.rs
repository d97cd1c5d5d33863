use chrono::Utc;

use crate::{
    error::{AppError, Result},
    models::session::AuthenticatedUser,
    state::AppState,
    validation::auth::require_credentials,
};

/// The scheme prefix expected in the `Authorization` header.
const BEARER_PREFIX: &str = "Bearer ";

/// A successful login.
#[derive(Debug, Clone)]
pub struct LoginGrant {
    /// The user that logged in.
    pub username: String,
    /// The signed session token.
    pub token: String,
}

/// Registers a new user.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `username` - The submitted username.
/// * `password` - The submitted password, stored as given.
///
/// # Returns
///
/// A `Result` containing the registered username.
pub async fn register(
    state: &AppState,
    username: Option<String>,
    password: Option<String>,
) -> Result<String> {
    let (username, password) = require_credentials(username, password)?;
    tracing::debug!("📝 Registering user: {}", username);

    state.users.insert(username.clone(), password).await?;

    tracing::info!(
        "✅ User registered: {} ({} users)",
        username,
        state.users.count().await
    );
    Ok(username)
}

/// Authenticates a user and issues a session token.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `username` - The submitted username.
/// * `password` - The submitted password.
///
/// # Returns
///
/// A `Result` containing the `LoginGrant`.
pub async fn login(
    state: &AppState,
    username: Option<String>,
    password: Option<String>,
) -> Result<LoginGrant> {
    let (username, password) = require_credentials(username, password)?;
    tracing::debug!("🔐 Authenticating user: {}", username);

    if !state.users.verify_credentials(&username, &password).await {
        return Err(AppError::Authentication(
            "Invalid username or password".to_string(),
        ));
    }

    let token = state.tokens.issue(&username, Utc::now())?;

    tracing::info!("✅ User logged in: {}", username);
    Ok(LoginGrant { username, token })
}

/// Verifies the value of an `Authorization` header.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `header` - The raw header value, if the header was sent.
///
/// # Returns
///
/// A `Result` containing the identity named by the token.
pub fn verify_bearer(state: &AppState, header: Option<&str>) -> Result<AuthenticatedUser> {
    let header = header
        .ok_or_else(|| AppError::Authentication("No token provided".to_string()))?;

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(|| AppError::Authentication("Malformed authorization header".to_string()))?;

    let claims = state.tokens.verify(token)?;
    Ok(AuthenticatedUser {
        username: claims.username,
    })
}
