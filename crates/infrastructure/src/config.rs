//! Client configuration.
//!
//! Layered: built-in defaults, then an optional file, then
//! `RENTAL_ADMIN_*` environment variables.

use std::path::Path;

use config::{Config, Environment, File};
use rental_admin_domain::REFRESH_PATH;
use serde::Deserialize;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";
/// Default request timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// Default login entry point the navigator sends users to.
pub const DEFAULT_LOGIN_PATH: &str = "/login";
/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "RENTAL_ADMIN";

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration could not be loaded or parsed.
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    /// A value was present but unusable.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Settings of the API client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL every relative path is appended to.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Path of the refresh endpoint, relative to the base URL.
    pub refresh_path: String,
    /// Login entry point used on unrecoverable auth failures.
    pub login_path: String,
    /// User-Agent header value.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            refresh_path: REFRESH_PATH.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            user_agent: format!("rental-admin/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Loads the configuration.
    ///
    /// `path`, when given, must exist; its format is picked from the
    /// extension. Environment variables such as `RENTAL_ADMIN_BASE_URL`
    /// override both.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a value is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config: Self = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values are usable.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-HTTP base URL or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| ConfigError::Invalid(format!("base_url {}: {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "base_url must be http or https: {}",
                self.base_url
            )));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid("timeout_ms must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000/api/v1");
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.refresh_path, "/auth/refresh");
        assert_eq!(config.login_path, "/login");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "base_url = \"https://admin.example.com/api/v1\"\ntimeout_ms = 2500"
        )
        .unwrap();

        let config = ClientConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.base_url, "https://admin.example.com/api/v1");
        assert_eq!(config.timeout_ms, 2500);
        assert_eq!(config.refresh_path, "/auth/refresh");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ClientConfig::load(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let config = ClientConfig {
            base_url: "ftp://example.com".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let config = ClientConfig {
            timeout_ms: 0,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
