use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use crate::error::{AppError, Result};
use crate::models::session::Claims;

/// Signs and verifies HS256 session tokens with a shared secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenKeys {
    /// Creates a new `TokenKeys`.
    ///
    /// # Arguments
    ///
    /// * `secret` - The HMAC secret.
    /// * `ttl_secs` - The lifetime of issued tokens in seconds.
    ///
    /// # Returns
    ///
    /// `AppError::Internal` if the lifetime does not fit a `Duration`.
    pub fn new(secret: &[u8], ttl_secs: i64) -> Result<Self> {
        let ttl = Duration::try_seconds(ttl_secs)
            .ok_or_else(|| AppError::Internal(format!("Token TTL out of range: {}s", ttl_secs)))?;

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact.
        validation.leeway = 0;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        })
    }

    /// Issues a token for `username`, valid from `issued_at` for the configured TTL.
    pub fn issue(&self, username: &str, issued_at: DateTime<Utc>) -> Result<String> {
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::Internal("Token expiry out of range".to_string()))?;

        let claims = Claims {
            username: username.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Verifies a token's signature and expiry and returns its claims.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::Authentication("Token expired".to_string()),
                _ => {
                    tracing::debug!("Token rejected: {}", e);
                    AppError::Authentication("Invalid token".to_string())
                }
            })
    }
}
