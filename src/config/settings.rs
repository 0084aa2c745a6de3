//! Application settings loaded from environment variables.

use std::env;

use super::constants::{DEFAULT_DATABASE_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// Passphrase the customer email cipher derives its key from
    field_key_passphrase: String,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("field_key_passphrase", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let field_key_passphrase = env::var("FIELD_KEY_PASSPHRASE").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                tracing::warn!("FIELD_KEY_PASSPHRASE not set, using insecure default for development");
                "dev-field-encryption-passphrase".to_string()
            } else {
                panic!("FIELD_KEY_PASSPHRASE environment variable must be set in production");
            }
        });

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            field_key_passphrase,
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
        }
    }

    /// Get the cipher passphrase bytes for key derivation.
    pub fn field_key_bytes(&self) -> &[u8] {
        self.field_key_passphrase.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl Config {
    /// Fixed configuration with an explicit passphrase (used by tests and
    /// embedded setups that bypass the environment).
    pub fn with_passphrase(database_url: impl Into<String>, passphrase: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            field_key_passphrase: passphrase.into(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}
