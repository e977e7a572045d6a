use std::path::PathBuf;

use heroes_core::config::{self, ConfigError};

/// Origin value meaning "allow every origin".
pub const ANY_ORIGIN: &str = "*";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory uploaded images are written to and served from.
    pub upload_dir: PathBuf,
    /// Maximum accepted request body size in bytes (default: 10 MiB).
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default     |
    /// |------------------------|-------------|
    /// | `HOST`                 | `0.0.0.0`   |
    /// | `PORT`                 | `3000`      |
    /// | `CORS_ORIGINS`         | `*`         |
    /// | `REQUEST_TIMEOUT_SECS` | `30`        |
    /// | `UPLOAD_DIR`           | `uploads`   |
    /// | `MAX_BODY_BYTES`       | `10485760`  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: config::string_or("HOST", "0.0.0.0"),
            port: config::parse_or("PORT", 3000)?,
            cors_origins: parse_origins(&config::string_or("CORS_ORIGINS", ANY_ORIGIN)),
            request_timeout_secs: config::parse_or("REQUEST_TIMEOUT_SECS", 30)?,
            upload_dir: PathBuf::from(config::string_or("UPLOAD_DIR", "uploads")),
            max_body_bytes: config::parse_or("MAX_BODY_BYTES", 10 * 1024 * 1024)?,
        })
    }

    /// Whether CORS should accept requests from any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == ANY_ORIGIN)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
