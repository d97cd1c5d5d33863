use crate::{
    error::{AppError, Result},
    models::review::{ReviewDeletion, ReviewRecord},
    repositories::book::ReviewRemoval,
    state::AppState,
    validation::review::require_review,
};

/// Creates or replaces a user's review of a book.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `isbn` - The ISBN of the book.
/// * `username` - The verified reviewer.
/// * `review` - The submitted review text.
///
/// # Returns
///
/// A `Result` containing the stored `ReviewRecord`.
pub async fn upsert_review(
    state: &AppState,
    isbn: &str,
    username: &str,
    review: Option<String>,
) -> Result<ReviewRecord> {
    let review = require_review(review)?;

    let title = state
        .books
        .upsert_review(isbn, username, review.clone())
        .await
        .ok_or_else(|| AppError::NotFound(format!("Book with ISBN {} not found", isbn)))?;

    tracing::info!("✍️ Review by {} saved on {}", username, isbn);

    Ok(ReviewRecord {
        isbn: isbn.to_string(),
        title,
        username: username.to_string(),
        review,
    })
}

/// Deletes a user's review of a book.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `isbn` - The ISBN of the book.
/// * `username` - The verified reviewer.
///
/// # Returns
///
/// A `Result` containing the `ReviewDeletion`.
pub async fn delete_review(state: &AppState, isbn: &str, username: &str) -> Result<ReviewDeletion> {
    match state.books.remove_review(isbn, username).await {
        ReviewRemoval::Removed { title } => {
            tracing::info!("🗑️ Review by {} deleted from {}", username, isbn);
            Ok(ReviewDeletion {
                isbn: isbn.to_string(),
                title,
                username: username.to_string(),
            })
        }
        ReviewRemoval::NoReview => Err(AppError::NotFound(format!(
            "No review found for user {} on book with ISBN {}",
            username, isbn
        ))),
        ReviewRemoval::UnknownBook => Err(AppError::NotFound(format!(
            "Book with ISBN {} not found",
            isbn
        ))),
    }
}
