use crate::error::{AppError, Result};

/// Returns the value when present and non-empty.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Validates that both credentials were supplied.
///
/// # Arguments
///
/// * `username` - The submitted username, if any.
/// * `password` - The submitted password, if any.
///
/// # Returns
///
/// The username and password, or `AppError::Validation` if either is missing or empty.
pub fn require_credentials(
    username: Option<String>,
    password: Option<String>,
) -> Result<(String, String)> {
    match (non_empty(username), non_empty(password)) {
        (Some(username), Some(password)) => Ok((username, password)),
        _ => Err(AppError::Validation(
            "Username and password are required".to_string(),
        )),
    }
}
