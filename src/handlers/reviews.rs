use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{ApiResult, WithMessage},
    extract::JsonBody,
    models::{
        review::{ReviewDeletion, ReviewRecord},
        session::AuthenticatedUser,
    },
    services::reviews as review_service,
    state::AppState,
};

/// The request payload for writing a review.
#[derive(Deserialize, Debug, Default)]
pub struct ReviewRequest {
    #[serde(default)]
    pub review: Option<String>,
}

/// The response payload for a written review.
#[derive(Serialize)]
pub struct ReviewResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub record: ReviewRecord,
}

/// The response payload for a deleted review.
#[derive(Serialize)]
pub struct ReviewDeletedResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub deletion: ReviewDeletion,
}

/// Adds or replaces the caller's review of a book.
#[axum::debug_handler]
pub async fn upsert_review(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(isbn): Path<String>,
    JsonBody(payload): JsonBody<ReviewRequest>,
) -> ApiResult<Response> {
    let record = review_service::upsert_review(&state, &isbn, &user.username, payload.review)
        .await
        .with_message("Review operation failed")?;

    let response = ReviewResponse {
        message: "Review added/modified successfully",
        record,
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Deletes the caller's review of a book.
#[axum::debug_handler]
pub async fn delete_review(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(isbn): Path<String>,
) -> ApiResult<Response> {
    let deletion = review_service::delete_review(&state, &isbn, &user.username)
        .await
        .with_message("Review deletion failed")?;

    let response = ReviewDeletedResponse {
        message: "Review deleted successfully",
        deletion,
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}
