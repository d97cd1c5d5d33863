use serde::Serialize;

/// The outcome of writing a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewRecord {
    pub isbn: String,
    pub title: String,
    pub username: String,
    pub review: String,
}

/// The outcome of deleting a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewDeletion {
    pub isbn: String,
    pub title: String,
    pub username: String,
}
