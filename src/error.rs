use axum::{
    extract::rejection::JsonRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// The application's error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// A required field is missing or empty, or the body could not be read.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The resource already exists.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Bad credentials or a missing, malformed or expired token.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A resource not found error.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The request body exceeds the configured limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// The request did not complete within the configured timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// An internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// A `Result` type that uses `AppError` as the error type.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The headline used when no operation-specific one is attached.
    fn default_message(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "Invalid request",
            AppError::Conflict(_) => "Conflict",
            AppError::Authentication(_) => "Access denied",
            AppError::NotFound(_) => "Not found",
            AppError::PayloadTooLarge(_) => "Payload too large",
            AppError::Timeout(_) => "Request timed out",
            AppError::Internal(_) => "Internal server error",
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(rejection.body_text()),
            _ => AppError::Validation(rejection.body_text()),
        }
    }
}

/// An `AppError` paired with the headline of the operation that failed.
///
/// Rendered as `{"message": <headline>, "error": <detail>}`.
#[derive(Debug)]
pub struct ApiError {
    pub message: &'static str,
    pub error: AppError,
}

/// The return type of every handler.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self {
            message: error.default_message(),
            error,
        }
    }
}

/// Attaches an operation headline to a failed `Result`.
pub trait WithMessage<T> {
    fn with_message(self, message: &'static str) -> ApiResult<T>;
}

impl<T> WithMessage<T> for Result<T> {
    fn with_message(self, message: &'static str) -> ApiResult<T> {
        self.map_err(|error| ApiError { message, error })
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    error: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status();

        let detail = match &self.error {
            AppError::Validation(msg) => {
                tracing::debug!("Validation error: {}", msg);
                msg.as_str()
            }
            AppError::Conflict(msg) => {
                tracing::debug!("Conflict: {}", msg);
                msg.as_str()
            }
            AppError::Authentication(msg) => {
                tracing::warn!("Authentication failed: {}", msg);
                msg.as_str()
            }
            AppError::NotFound(msg) => {
                tracing::debug!("Resource not found: {}", msg);
                msg.as_str()
            }
            AppError::PayloadTooLarge(msg) => {
                tracing::debug!("Payload too large: {}", msg);
                msg.as_str()
            }
            AppError::Timeout(msg) => {
                tracing::warn!("Request timed out: {}", msg);
                msg.as_str()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error"
            }
        };

        let body = sonic_rs::to_string(&ErrorBody {
            message: self.message,
            error: detail,
        })
        .unwrap_or_else(|_| {
            r#"{"message":"Internal server error","error":"Internal server error"}"#.to_string()
        });

        (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
