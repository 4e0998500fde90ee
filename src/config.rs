//! Server configuration from environment variables.

use std::env;
use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Database connection string.
    pub database_dsn: String,
    /// Port to listen on.
    pub port: u16,
    /// CORS allowed origins (comma-separated, or "*" for any origin).
    pub cors_allowed_origins: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `PG_DSN`: database connection string
    ///
    /// Optional:
    /// - `PORT`: server port (default: 8000)
    /// - `CORS_ALLOWED_ORIGINS`: allowed CORS origins (default: "*")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_dsn = get("PG_DSN").ok_or(ConfigError::MissingEnvVar("PG_DSN"))?;

        let port = match get("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value: raw,
            })?,
            None => 8000,
        };

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| "*".to_string());

        Ok(Self {
            database_dsn,
            port,
            cors_allowed_origins,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("invalid value for environment variable {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}
