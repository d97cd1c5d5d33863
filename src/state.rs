use crate::config::Config;
use crate::crypto::token::TokenKeys;
use crate::error::Result;
use crate::models::book::Book;
use crate::repositories::{book::BookRepository, user::UserRepository};

/// The application's state.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Config,
    /// Signs and verifies session tokens.
    pub tokens: TokenKeys,
    /// The registered users.
    pub users: UserRepository,
    /// The book catalog and its reviews.
    pub books: BookRepository,
}

impl AppState {
    /// Creates a new `AppState`.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    /// * `catalog` - The books to seed the catalog with.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AppState`.
    pub fn new(config: &Config, catalog: Vec<Book>) -> Result<Self> {
        let tokens = TokenKeys::new(&config.jwt_secret, config.token_ttl_secs)?;
        tracing::info!("✅ Token keys initialized (ttl {}s)", config.token_ttl_secs);

        let books = BookRepository::new(catalog)?;
        tracing::info!("✅ Catalog initialized with {} books", books.len());

        Ok(AppState {
            config: config.clone(),
            tokens,
            users: UserRepository::new(),
            books,
        })
    }
}
