use std::sync::Arc;
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, Result},
    models::user::User,
};

/// The in-memory store of registered users, in registration order.
#[derive(Clone, Default)]
pub struct UserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl UserRepository {
    /// Creates an empty `UserRepository`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new user.
    ///
    /// The uniqueness check and the append run under one write lock, so two
    /// concurrent registrations of the same username cannot both succeed.
    ///
    /// # Returns
    ///
    /// `AppError::Conflict` if the username is already taken.
    pub async fn insert(&self, username: String, password: String) -> Result<()> {
        let mut users = self.users.write().await;

        if users.iter().any(|user| user.username == username) {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        users.push(User { username, password });
        Ok(())
    }

    /// Returns whether a user matches both `username` and `password` exactly.
    pub async fn verify_credentials(&self, username: &str, password: &str) -> bool {
        let users = self.users.read().await;
        users.iter().any(|user| {
            user.username == username
                && bool::from(user.password.as_bytes().ct_eq(password.as_bytes()))
        })
    }

    /// Returns the number of registered users.
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}
