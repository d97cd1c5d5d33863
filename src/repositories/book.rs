use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, Result},
    models::book::{Book, BookSummary, Reviews},
};

/// A catalog entry. Metadata is fixed after startup; only the reviews change.
struct BookEntry {
    isbn: String,
    title: String,
    author: String,
    reviews: RwLock<Reviews>,
}

impl BookEntry {
    async fn snapshot(&self) -> Book {
        Book {
            isbn: self.isbn.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            reviews: self.reviews.read().await.clone(),
        }
    }
}

/// The result of removing a review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewRemoval {
    /// No book has this ISBN.
    UnknownBook,
    /// The book exists but the user has not reviewed it.
    NoReview,
    /// The review was removed from the book with this title.
    Removed { title: String },
}

/// The in-memory catalog, in seed order, with one lock per book's reviews.
#[derive(Clone)]
pub struct BookRepository {
    books: Arc<Vec<BookEntry>>,
    index: Arc<HashMap<String, usize>>,
}

impl BookRepository {
    /// Builds the catalog from seed records.
    ///
    /// # Returns
    ///
    /// `AppError::Validation` if an ISBN is empty or appears twice.
    pub fn new(seed: Vec<Book>) -> Result<Self> {
        let mut books = Vec::with_capacity(seed.len());
        let mut index = HashMap::with_capacity(seed.len());

        for book in seed {
            if book.isbn.trim().is_empty() {
                return Err(AppError::Validation("Catalog entry with empty ISBN".to_string()));
            }
            if index.insert(book.isbn.clone(), books.len()).is_some() {
                return Err(AppError::Validation(format!(
                    "Duplicate ISBN in catalog: {}",
                    book.isbn
                )));
            }
            books.push(BookEntry {
                isbn: book.isbn,
                title: book.title,
                author: book.author,
                reviews: RwLock::new(book.reviews),
            });
        }

        Ok(Self {
            books: Arc::new(books),
            index: Arc::new(index),
        })
    }

    fn entry(&self, isbn: &str) -> Option<&BookEntry> {
        self.index.get(isbn).map(|&i| &self.books[i])
    }

    /// Returns the number of books in the catalog.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Lists every book without its reviews.
    pub fn summaries(&self) -> Vec<BookSummary> {
        self.books
            .iter()
            .map(|entry| BookSummary {
                isbn: entry.isbn.clone(),
                title: entry.title.clone(),
                author: entry.author.clone(),
            })
            .collect()
    }

    /// Finds a book by ISBN.
    pub async fn find(&self, isbn: &str) -> Option<Book> {
        match self.entry(isbn) {
            Some(entry) => Some(entry.snapshot().await),
            None => None,
        }
    }

    /// Finds every book whose author equals `author`, ignoring case.
    pub async fn find_by_author(&self, author: &str) -> Vec<Book> {
        let needle = author.to_lowercase();
        let mut found = Vec::new();
        for entry in self.books.iter() {
            if entry.author.to_lowercase() == needle {
                found.push(entry.snapshot().await);
            }
        }
        found
    }

    /// Finds every book whose title contains `fragment`, ignoring case.
    pub async fn find_by_title(&self, fragment: &str) -> Vec<Book> {
        let needle = fragment.to_lowercase();
        let mut found = Vec::new();
        for entry in self.books.iter() {
            if entry.title.to_lowercase().contains(&needle) {
                found.push(entry.snapshot().await);
            }
        }
        found
    }

    /// Sets `username`'s review on a book, replacing any earlier one.
    ///
    /// # Returns
    ///
    /// The book's title, or `None` if the ISBN is unknown.
    pub async fn upsert_review(&self, isbn: &str, username: &str, review: String) -> Option<String> {
        let entry = self.entry(isbn)?;
        entry
            .reviews
            .write()
            .await
            .insert(username.to_string(), review);
        Some(entry.title.clone())
    }

    /// Removes `username`'s review from a book.
    pub async fn remove_review(&self, isbn: &str, username: &str) -> ReviewRemoval {
        let Some(entry) = self.entry(isbn) else {
            return ReviewRemoval::UnknownBook;
        };

        match entry.reviews.write().await.shift_remove(username) {
            Some(_) => ReviewRemoval::Removed {
                title: entry.title.clone(),
            },
            None => ReviewRemoval::NoReview,
        }
    }
}
