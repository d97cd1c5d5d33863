use crate::{
    error::{AppError, Result},
    models::book::{Book, BookSummary, Reviews},
    state::AppState,
};

fn book_not_found(isbn: &str) -> AppError {
    AppError::NotFound(format!("No book found with ISBN: {}", isbn))
}

/// Lists every book in catalog order.
pub fn list_books(state: &AppState) -> Vec<BookSummary> {
    state.books.summaries()
}

/// Gets a book and its reviews by ISBN.
pub async fn book_by_isbn(state: &AppState, isbn: &str) -> Result<Book> {
    state.books.find(isbn).await.ok_or_else(|| book_not_found(isbn))
}

/// Gets the books written by `author`, ignoring case. May be empty.
pub async fn books_by_author(state: &AppState, author: &str) -> Vec<Book> {
    state.books.find_by_author(author).await
}

/// Gets the books whose title contains `fragment`, ignoring case. May be empty.
pub async fn books_by_title(state: &AppState, fragment: &str) -> Vec<Book> {
    state.books.find_by_title(fragment).await
}

/// Gets a book's title and reviews by ISBN.
pub async fn reviews(state: &AppState, isbn: &str) -> Result<(String, Reviews)> {
    let book = book_by_isbn(state, isbn).await?;
    Ok((book.title, book.reviews))
}
