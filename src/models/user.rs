use zeroize::{Zeroize, ZeroizeOnDrop};

/// Represents a registered customer.
///
/// Passwords are kept as submitted; no hashing is applied.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct User {
    /// The user's unique username.
    #[zeroize(skip)]
    pub username: String,
    /// The user's plaintext password.
    pub password: String,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
