use folio_core::assets::DEFAULT_MAX_IMAGE_BYTES;

use crate::auth::jwt::JwtConfig;

/// The single dashboard administrator.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    /// Login email, compared case-insensitively.
    pub email: String,
    /// Argon2id PHC string (see the `folio-hash-password` binary).
    pub password_hash: String,
}

impl AdminCredentials {
    /// Load the admin identity from `ADMIN_EMAIL` and `ADMIN_PASSWORD_HASH`.
    ///
    /// # Panics
    ///
    /// Panics if either variable is missing or empty.
    pub fn from_env() -> Self {
        let email = std::env::var("ADMIN_EMAIL").expect("ADMIN_EMAIL must be set");
        let password_hash =
            std::env::var("ADMIN_PASSWORD_HASH").expect("ADMIN_PASSWORD_HASH must be set");
        assert!(!email.trim().is_empty(), "ADMIN_EMAIL must not be empty");
        assert!(
            password_hash.starts_with("$argon2"),
            "ADMIN_PASSWORD_HASH must be an Argon2 PHC string"
        );

        Self {
            email: email.trim().to_string(),
            password_hash,
        }
    }

    pub fn matches_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the admin identity and JWT secret have defaults suitable
/// for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on draining in-flight requests after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    /// Largest accepted project image, in bytes (default: 5 MiB).
    pub max_upload_bytes: usize,
    /// Directory holding the public site and `dashboard.html`, if served here.
    pub static_dir: Option<String>,
    /// Directory served at `/assets` when images are stored on local disk.
    pub asset_dir: Option<String>,
    /// Add `Secure` to the session cookie (default: `false`).
    pub cookie_secure: bool,
    /// Session token configuration.
    pub jwt: JwtConfig,
    pub admin: AdminCredentials,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                    |
    /// | `MAX_UPLOAD_BYTES`      | `5242880`               |
    /// | `STATIC_DIR`            | --                      |
    /// | `COOKIE_SECURE`         | `false`                 |
    ///
    /// `asset_dir` is left unset; the binary fills it in from the storage
    /// configuration.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .map(|v| v.parse().expect("MAX_UPLOAD_BYTES must be a valid usize"))
            .unwrap_or(DEFAULT_MAX_IMAGE_BYTES);

        let static_dir = std::env::var("STATIC_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            max_upload_bytes,
            static_dir,
            asset_dir: None,
            cookie_secure,
            jwt: JwtConfig::from_env(),
            admin: AdminCredentials::from_env(),
        }
    }
}
