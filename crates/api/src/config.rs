use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Default request body limit for uploads (20 MiB).
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
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
    /// Maximum connections in the database pool (default: `10`).
    pub db_max_connections: u32,
    /// Directory uploaded files are written to and served from.
    pub upload_dir: PathBuf,
    /// Request body limit for upload endpoints, in bytes.
    pub max_upload_bytes: usize,
    /// Root account bootstrapped at startup, if both values are set.
    pub root_account: Option<RootAccount>,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

/// Credentials for the bootstrap admin account.
#[derive(Clone)]
pub struct RootAccount {
    pub email: String,
    pub initial_password: String,
}

impl std::fmt::Debug for RootAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RootAccount")
            .field("email", &self.email)
            .field("initial_password", &"<redacted>")
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `DB_MAX_CONNECTIONS`    | `10`                       |
    /// | `UPLOAD_DIR`            | `uploads`                  |
    /// | `MAX_UPLOAD_BYTES`      | `20971520`                 |
    /// | `ROOT_EMAIL`            | unset                      |
    /// | `ROOT_INITIAL_PASSWORD` | unset                      |
    ///
    /// # Panics
    ///
    /// Panics on malformed numeric values and when the JWT settings are
    /// missing. Misconfiguration should stop the process at startup.
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

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let upload_dir =
            PathBuf::from(std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()));

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let root_account = match (
            std::env::var("ROOT_EMAIL").ok().filter(|v| !v.is_empty()),
            std::env::var("ROOT_INITIAL_PASSWORD")
                .ok()
                .filter(|v| !v.is_empty()),
        ) {
            (Some(email), Some(initial_password)) => Some(RootAccount {
                email,
                initial_password,
            }),
            _ => None,
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            db_max_connections,
            upload_dir,
            max_upload_bytes,
            root_account,
            jwt,
        }
    }
}
