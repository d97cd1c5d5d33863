use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Reviews on a single book, keyed by the reviewer's username, in the order
/// they were first written.
pub type Reviews = IndexMap<String, String>;

/// A point-in-time copy of a book and its reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// The book's ISBN, used as the catalog key.
    pub isbn: String,
    /// The book's title.
    pub title: String,
    /// The book's author.
    pub author: String,
    /// The reviews left on the book.
    #[serde(default)]
    pub reviews: Reviews,
}

/// The listing form of a book, without its reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSummary {
    pub isbn: String,
    pub title: String,
    pub author: String,
}
