use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use anyhow::{Context, Result};
use zeroize::{Zeroize, Zeroizing};

/// Minimum length of the token signing secret in bytes.
pub const MIN_SECRET_BYTES: usize = 32;
/// Maximum token lifetime in seconds (one year).
pub const MAX_TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;

/// The application's configuration.
#[derive(Clone)]
pub struct Config {
    /// The address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// The HMAC secret used to sign and verify session tokens.
    pub jwt_secret: Zeroizing<Vec<u8>>,
    /// The lifetime of an issued token in seconds.
    pub token_ttl_secs: i64,
    /// The upper bound on the time spent serving a single request.
    pub request_timeout_secs: u64,
    /// An optional JSON file that replaces the built-in catalog seed.
    pub catalog_path: Option<PathBuf>,
    /// The origins allowed by the CORS layer.
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Creates a new `Config` from a key lookup.
    ///
    /// # Arguments
    ///
    /// * `lookup` - Returns the value of a variable, or `None` if unset.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut secret = lookup("JWT_SECRET")
            .context("JWT_SECRET must be set (generate with: openssl rand -hex 32)")?;

        let jwt_secret = Zeroizing::new(secret.as_bytes().to_vec());
        secret.zeroize();

        if jwt_secret.len() < MIN_SECRET_BYTES {
            anyhow::bail!("JWT_SECRET must be at least {} bytes", MIN_SECRET_BYTES);
        }

        let token_ttl_secs: i64 = lookup("TOKEN_TTL_SECS")
            .unwrap_or_else(|| "3600".to_string())
            .parse()
            .context("Invalid TOKEN_TTL_SECS")?;

        if token_ttl_secs <= 0 {
            anyhow::bail!("TOKEN_TTL_SECS must be positive");
        }

        if token_ttl_secs > MAX_TOKEN_TTL_SECS {
            anyhow::bail!("TOKEN_TTL_SECS must be at most {}", MAX_TOKEN_TTL_SECS);
        }

        Ok(Self {
            bind_addr: lookup("BIND_ADDR")
                .unwrap_or_else(|| "127.0.0.1:5000".to_string())
                .parse()
                .context("Invalid BIND_ADDR")?,
            jwt_secret,
            token_ttl_secs,
            request_timeout_secs: lookup("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse()
                .context("Invalid REQUEST_TIMEOUT_SECS")?,
            catalog_path: lookup("CATALOG_PATH").map(PathBuf::from),
            allowed_origins: parse_origins(
                &lookup("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|| "http://localhost:3000".to_string()),
            ),
        })
    }
}

#[cfg(test)]
impl Config {
    /// A configuration for in-process tests.
    pub fn for_tests() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            jwt_secret: Zeroizing::new(b"test-secret-test-secret-test-secret!".to_vec()),
            token_ttl_secs: 3600,
            request_timeout_secs: 30,
            catalog_path: None,
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

/// Splits a comma-separated origin list, dropping blank entries.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = config_from(&[("JWT_SECRET", SECRET)]).unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:5000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.jwt_secret.as_slice(), SECRET.as_bytes());
        assert_eq!(config.token_ttl_secs, 3600);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.catalog_path.is_none());
        assert_eq!(config.allowed_origins, vec!["http://localhost:3000"]);
    }

    #[test]
    fn secret_is_required() {
        let err = config_from(&[]).err().unwrap();
        assert!(err.to_string().contains("JWT_SECRET must be set"));
    }

    #[test]
    fn short_secret_is_rejected() {
        let short = &SECRET[..MIN_SECRET_BYTES - 1];
        let err = config_from(&[("JWT_SECRET", short)]).err().unwrap();
        assert!(err.to_string().contains("at least 32 bytes"));
    }

    #[test]
    fn ttl_must_be_positive() {
        for ttl in ["0", "-1"] {
            let err = config_from(&[("JWT_SECRET", SECRET), ("TOKEN_TTL_SECS", ttl)])
                .err()
                .unwrap();
            assert!(err.to_string().contains("must be positive"), "ttl {}", ttl);
        }
    }

    #[test]
    fn ttl_is_capped_at_one_year() {
        let one_year = MAX_TOKEN_TTL_SECS.to_string();
        let config = config_from(&[("JWT_SECRET", SECRET), ("TOKEN_TTL_SECS", one_year.as_str())]).unwrap();
        assert_eq!(config.token_ttl_secs, MAX_TOKEN_TTL_SECS);

        for ttl in ["31536001", "10000000000000", "9223372036854775807"] {
            let err = config_from(&[("JWT_SECRET", SECRET), ("TOKEN_TTL_SECS", ttl)])
                .err()
                .unwrap();
            assert!(err.to_string().contains("at most"), "ttl {}", ttl);
        }
    }

    #[test]
    fn unparsable_values_are_rejected() {
        let err = config_from(&[("JWT_SECRET", SECRET), ("BIND_ADDR", "localhost")])
            .err()
            .unwrap();
        assert!(err.to_string().contains("Invalid BIND_ADDR"));

        let err = config_from(&[("JWT_SECRET", SECRET), ("TOKEN_TTL_SECS", "an hour")])
            .err()
            .unwrap();
        assert!(err.to_string().contains("Invalid TOKEN_TTL_SECS"));
    }

    #[test]
    fn overrides_are_read() {
        let config = config_from(&[
            ("JWT_SECRET", SECRET),
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("TOKEN_TTL_SECS", "60"),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("CATALOG_PATH", "/srv/books.json"),
            ("CORS_ALLOWED_ORIGINS", "http://a.test,http://b.test"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.token_ttl_secs, 60);
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.catalog_path, Some(PathBuf::from("/srv/books.json")));
        assert_eq!(config.allowed_origins.len(), 2);
    }

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        let origins = parse_origins(" http://a.test, ,http://b.test ,");
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }
}
