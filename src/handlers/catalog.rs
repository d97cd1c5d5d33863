use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{
    error::{ApiError, ApiResult, AppError, WithMessage},
    models::book::{Book, BookSummary, Reviews},
    services::catalog as catalog_service,
    state::AppState,
};

#[derive(Serialize)]
pub struct BookListResponse {
    pub message: &'static str,
    pub books: Vec<BookSummary>,
}

#[derive(Serialize)]
pub struct BookResponse {
    pub message: &'static str,
    pub book: Book,
}

#[derive(Serialize)]
pub struct BookSearchResponse {
    pub message: String,
    pub books: Vec<Book>,
}

#[derive(Serialize)]
pub struct ReviewsResponse {
    pub message: &'static str,
    pub isbn: String,
    pub title: String,
    pub reviews: Reviews,
}

/// Lists every book in the catalog.
#[axum::debug_handler]
pub async fn list_books(State(state): State<AppState>) -> Response {
    let response = BookListResponse {
        message: "Books retrieved successfully",
        books: catalog_service::list_books(&state),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Gets a book by ISBN.
#[axum::debug_handler]
pub async fn book_by_isbn(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> ApiResult<Response> {
    let book = catalog_service::book_by_isbn(&state, &isbn)
        .await
        .with_message("Book not found")?;

    let response = BookResponse {
        message: "Book found successfully",
        book,
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Gets the books by an author, ignoring case.
#[axum::debug_handler]
pub async fn books_by_author(
    State(state): State<AppState>,
    Path(author): Path<String>,
) -> ApiResult<Response> {
    let books = catalog_service::books_by_author(&state, &author).await;

    if books.is_empty() {
        return Err(ApiError {
            message: "No books found",
            error: AppError::NotFound(format!("No books found by author: {}", author)),
        });
    }

    let response = BookSearchResponse {
        message: format!("Found {} book(s) by {}", books.len(), author),
        books,
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Gets the books whose title contains a fragment, ignoring case.
#[axum::debug_handler]
pub async fn books_by_title(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> ApiResult<Response> {
    let books = catalog_service::books_by_title(&state, &title).await;

    if books.is_empty() {
        return Err(ApiError {
            message: "No books found",
            error: AppError::NotFound(format!("No books found with title containing: {}", title)),
        });
    }

    let response = BookSearchResponse {
        message: format!(
            "Found {} book(s) with title containing \"{}\"",
            books.len(),
            title
        ),
        books,
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Gets the reviews of a book.
#[axum::debug_handler]
pub async fn book_reviews(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> ApiResult<Response> {
    let (title, reviews) = catalog_service::reviews(&state, &isbn)
        .await
        .with_message("Book not found")?;

    let message = if reviews.is_empty() {
        "No reviews found for this book"
    } else {
        "Book reviews retrieved successfully"
    };

    let response = ReviewsResponse {
        message,
        isbn,
        title,
        reviews,
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Answers requests that match no route.
#[axum::debug_handler]
pub async fn fallback() -> Response {
    AppError::NotFound("Route not found".to_string()).into_response()
}
