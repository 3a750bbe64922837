//! API server configuration.

use savor_core::auth::jwt::resolve_jwt_secret;
use savor_core::provider::ProviderConfig;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:5000").
    pub bind_addr: String,
    /// PostgreSQL connection URL. `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// External recipe and generation providers.
    pub providers: ProviderConfig,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                     | Default                          |
    /// |------------------------------|----------------------------------|
    /// | `BIND_ADDR`                  | `127.0.0.1:5000`                 |
    /// | `DATABASE_URL`               | unset (in-memory store)          |
    /// | `JWT_SECRET` / `AUTH_SECRET` | generated & persisted to file    |
    ///
    /// Provider variables are documented on [`ProviderConfig::from_env`].
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".into()),
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            jwt_secret: resolve_jwt_secret(),
            providers: ProviderConfig::from_env(),
        }
    }

    /// Configuration with a fixed secret and no providers, for tests and
    /// embedding.
    pub fn with_secret(jwt_secret: impl Into<String>) -> Self {
        Self {
            bind_addr: "127.0.0.1:0".into(),
            database_url: None,
            jwt_secret: jwt_secret.into(),
            providers: ProviderConfig::default(),
        }
    }
}
