use crate::error::{AppError, Result};
use crate::validation::auth::non_empty;

/// Validates that review text was supplied.
pub fn require_review(review: Option<String>) -> Result<String> {
    non_empty(review).ok_or_else(|| AppError::Validation("Review text is required".to_string()))
}
