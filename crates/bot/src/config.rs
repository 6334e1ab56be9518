//! Bot configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `LINE_CHANNEL_ACCESS_TOKEN` - Messaging API channel access token
//! - `LINE_CHANNEL_SECRET` - Channel secret for webhook signature checks
//!
//! ## Optional
//! - `OTOKU_HOST` - Bind address (default: 127.0.0.1)
//! - `OTOKU_PORT` - Listen port (default: 3000)
//! - `OTOKU_CATALOG_PATH` - Shop seed file (default: data/shops.json)
//! - `OTOKU_RESERVE_MODE` - Reservation argument layout: `with-item`
//!   (default) or `count-only`
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use otoku_core::ReserveArgumentMode;

/// Channel secrets shorter than this are certainly misconfigured.
const MIN_SECRET_LENGTH: usize = 16;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Bot application configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct BotConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Messaging API channel access token
    pub channel_access_token: SecretString,
    /// Channel secret for verifying webhook signatures
    pub channel_secret: SecretString,
    /// Path to the shop catalog seed file
    pub catalog_path: PathBuf,
    /// Reservation command argument layout
    pub reserve_mode: ReserveArgumentMode,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("channel_access_token", &"[REDACTED]")
            .field("channel_secret", &"[REDACTED]")
            .field("catalog_path", &self.catalog_path)
            .field("reserve_mode", &self.reserve_mode)
            .field("sentry_dsn", &self.sentry_dsn)
            .finish()
    }
}

impl BotConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("OTOKU_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("OTOKU_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("OTOKU_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("OTOKU_PORT".to_string(), e.to_string()))?;

        let channel_access_token = get_required_secret("LINE_CHANNEL_ACCESS_TOKEN")?;
        let channel_secret = get_required_secret("LINE_CHANNEL_SECRET")?;

        let catalog_path = PathBuf::from(get_env_or_default("OTOKU_CATALOG_PATH", "data/shops.json"));
        let reserve_mode = parse_reserve_mode(&get_env_or_default("OTOKU_RESERVE_MODE", "with-item"))?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            channel_access_token,
            channel_secret,
            catalog_path,
            reserve_mode,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Load a required secret and reject obviously truncated values.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    let secret = SecretString::from(value);
    if secret.expose_secret().len() < MIN_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            key.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SECRET_LENGTH,
                secret.expose_secret().len()
            ),
        ));
    }
    Ok(secret)
}

/// Parse the reservation argument layout setting.
fn parse_reserve_mode(value: &str) -> Result<ReserveArgumentMode, ConfigError> {
    match value {
        "with-item" => Ok(ReserveArgumentMode::WithItem),
        "count-only" => Ok(ReserveArgumentMode::CountOnly),
        other => Err(ConfigError::InvalidEnvVar(
            "OTOKU_RESERVE_MODE".to_string(),
            format!("expected 'with-item' or 'count-only', got '{other}'"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> BotConfig {
        BotConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            channel_access_token: SecretString::from("a".repeat(40)),
            channel_secret: SecretString::from("0123456789abcdef0123456789abcdef"),
            catalog_path: PathBuf::from("data/shops.json"),
            reserve_mode: ReserveArgumentMode::WithItem,
            sentry_dsn: None,
        }
    }

    #[test]
    fn test_parse_reserve_mode() {
        assert_eq!(
            parse_reserve_mode("with-item").unwrap(),
            ReserveArgumentMode::WithItem
        );
        assert_eq!(
            parse_reserve_mode("count-only").unwrap(),
            ReserveArgumentMode::CountOnly
        );
        assert!(parse_reserve_mode("auto").is_err());
        // Never auto-detected, so an empty value is also an error
        assert!(parse_reserve_mode("").is_err());
    }

    #[test]
    fn test_socket_addr() {
        let addr = test_config().socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let debug_output = format!("{:?}", test_config());
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("0123456789abcdef"));
    }
}
