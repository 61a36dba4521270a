//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `FOODEXPRESS_HOST` - Bind address (default: 127.0.0.1)
//! - `FOODEXPRESS_PORT` - Listen port (default: 3000)
//! - `FOODEXPRESS_DATA_DIR` - Directory holding the JSON blobs (default: `data`)
//! - `FOODEXPRESS_ENV` - `development` or `production` (default: development)
//! - `FOODEXPRESS_ADMIN_USERNAME` - Back office login (default: admin)
//! - `FOODEXPRESS_ADMIN_PASSWORD` - Back office password (required in production)
//! - `FOODEXPRESS_LOG_FORMAT` - `json` for JSON logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.1)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Password used when none is configured outside production.
pub const DEV_ADMIN_PASSWORD: &str = "admin123";

const DEFAULT_ADMIN_USERNAME: &str = "admin";

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

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("expected 'development' or 'production', got '{other}'")),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// The single back office account.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory for the persisted JSON blobs
    pub data_dir: PathBuf,
    /// Deployment environment
    pub environment: Environment,
    /// Back office account
    pub admin: AdminCredentials,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry transaction sample rate
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is invalid, or if production runs
    /// without an explicit admin password.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = EnvSource(lookup);

        let host = env.parse_or("FOODEXPRESS_HOST", "127.0.0.1")?;
        let port = env.parse_or("FOODEXPRESS_PORT", "3000")?;
        let data_dir = PathBuf::from(env.get_or_default("FOODEXPRESS_DATA_DIR", "data"));
        let environment: Environment = env.parse_or("FOODEXPRESS_ENV", "development")?;
        let admin = AdminCredentials::from_source(&env, environment)?;

        let log_format = match env.get("FOODEXPRESS_LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            host,
            port,
            data_dir,
            environment,
            admin,
            log_format,
            sentry_dsn: env.get("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: env.get("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: env.parse_or("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: env.parse_or("SENTRY_TRACES_SAMPLE_RATE", "0.1")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies must carry the `Secure` attribute.
    #[must_use]
    pub const fn secure_cookies(&self) -> bool {
        self.environment.is_production()
    }

    /// Development configuration with the given data directory.
    #[must_use]
    pub fn development(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            data_dir: data_dir.into(),
            environment: Environment::Development,
            admin: AdminCredentials {
                username: DEFAULT_ADMIN_USERNAME.to_string(),
                password: SecretString::from(DEV_ADMIN_PASSWORD),
            },
            log_format: LogFormat::Text,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.1,
        }
    }
}

impl AdminCredentials {
    fn from_source<F>(env: &EnvSource<F>, environment: Environment) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let username = env.get_or_default("FOODEXPRESS_ADMIN_USERNAME", DEFAULT_ADMIN_USERNAME);
        if username.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "FOODEXPRESS_ADMIN_USERNAME".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let password = match env.get("FOODEXPRESS_ADMIN_PASSWORD") {
            Some(password) => SecretString::from(password),
            None if environment.is_production() => {
                return Err(ConfigError::MissingEnvVar(
                    "FOODEXPRESS_ADMIN_PASSWORD".to_string(),
                ));
            }
            None => SecretString::from(DEV_ADMIN_PASSWORD),
        };

        if environment.is_production() {
            validate_admin_password(&password, "FOODEXPRESS_ADMIN_PASSWORD")?;
        }

        Ok(Self { username, password })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct EnvSource<F>(F);

impl<F> EnvSource<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }

    /// Get a variable with a default value.
    fn get_or_default(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get_or_default(key, default)
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}

/// Reject empty passwords and the well-known development default.
fn validate_admin_password(password: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = password.expose_secret();
    if value.is_empty() {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            "must not be empty".to_string(),
        ));
    }
    if value == DEV_ADMIN_PASSWORD {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            "must not be the development default".to_string(),
        ));
    }
    Ok(())
}
