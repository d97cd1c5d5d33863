use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json`, with body rejections reported as validation errors.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);
