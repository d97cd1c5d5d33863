use std::path::Path;
use anyhow::{Context, Result};

use crate::models::book::{Book, Reviews};

/// The catalog loaded when no `CATALOG_PATH` is configured.
pub fn default_books() -> Vec<Book> {
    [
        ("1", "Things Fall Apart", "Chinua Achebe"),
        ("2", "Fairy tales", "Hans Christian Andersen"),
        ("3", "The Divine Comedy", "Dante Alighieri"),
        ("4", "The Epic Of Gilgamesh", "Unknown"),
        ("5", "The Book Of Job", "Unknown"),
        ("6", "One Thousand and One Nights", "Unknown"),
        ("7", "Njál's Saga", "Unknown"),
        ("8", "Pride and Prejudice", "Jane Austen"),
        ("9", "Le Père Goriot", "Honoré de Balzac"),
        ("10", "Molloy, Malone Dies, The Unnamable, the trilogy", "Samuel Beckett"),
    ]
    .into_iter()
    .map(|(isbn, title, author)| Book {
        isbn: isbn.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        reviews: Reviews::new(),
    })
    .collect()
}

/// Parses a catalog from a JSON array of `{isbn, title, author, reviews?}`.
pub fn parse_books(json: &str) -> Result<Vec<Book>> {
    sonic_rs::from_str::<Vec<Book>>(json).context("Catalog must be a JSON array of books")
}

/// Loads the catalog from `path`, or the built-in one when `path` is `None`.
pub fn load_books(path: Option<&Path>) -> Result<Vec<Book>> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read catalog {}", path.display()))?;
            let books = parse_books(&raw)?;
            tracing::info!("📚 Loaded {} books from {}", books.len(), path.display());
            Ok(books)
        }
        None => Ok(default_books()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_ten_unreviewed_books() {
        let books = default_books();
        assert_eq!(books.len(), 10);
        assert_eq!(books[0].isbn, "1");
        assert_eq!(books[7].author, "Jane Austen");
        assert!(books.iter().all(|b| b.reviews.is_empty()));
    }

    #[test]
    fn parses_catalog_with_optional_reviews() {
        let books = parse_books(
            r#"[
                {"isbn": "978-0", "title": "Dune", "author": "Frank Herbert"},
                {"isbn": "978-1", "title": "Emma", "author": "Jane Austen",
                 "reviews": {"alice": "Witty"}}
            ]"#,
        )
        .unwrap();

        assert_eq!(books.len(), 2);
        assert!(books[0].reviews.is_empty());
        assert_eq!(books[1].reviews["alice"], "Witty");
    }

    #[test]
    fn rejects_non_array_catalog() {
        assert!(parse_books(r#"{"1": {"title": "x"}}"#).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_books(Some(Path::new("/nonexistent/catalog.json"))).is_err());
    }
}
