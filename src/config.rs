//! Configuration management for Stockdesk.
//!
//! Settings come from environment variables. A `.env` file is loaded first if
//! one exists; its absence is not an error.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Default ZeroBounce v2 endpoint.
pub const DEFAULT_VERIFICATION_API_URL: &str = "https://api.zerobounce.net/v2";

/// Configuration for Stockdesk.
#[derive(Debug, Clone)]
pub struct Config {
    /// Record store REST base URL
    pub store_api_url: String,

    /// Record store API key
    pub store_api_key: String,

    /// Email verification API key. `None` selects the local heuristics.
    pub zerobounce_api_key: Option<String>,

    /// Email verification API base URL
    pub verification_api_url: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `STORE_API_URL`: Base URL for the record store
    /// - `STORE_API_KEY`: API key for the record store
    ///
    /// Optional environment variables:
    /// - `ZEROBOUNCE_API_KEY`: Enables the external verification path
    /// - `VERIFICATION_API_URL`: Verification endpoint (default: ZeroBounce v2)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        let base = Self::verification_from_env()?;

        let store_api_url = env::var("STORE_API_URL")
            .map_err(|_| ConfigError::MissingVar("STORE_API_URL".to_string()))?;

        let store_api_key = env::var("STORE_API_KEY")
            .map_err(|_| ConfigError::MissingVar("STORE_API_KEY".to_string()))?;

        Self::require_http_url("STORE_API_URL", &store_api_url)?;

        if store_api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "STORE_API_KEY".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        Ok(Config {
            store_api_url,
            store_api_key,
            ..base
        })
    }

    /// Load only the settings email validation needs.
    ///
    /// The store variables are not read, so validation works without a
    /// configured backend.
    pub fn verification_from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let zerobounce_api_key = env::var("ZEROBOUNCE_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        let verification_api_url = env::var("VERIFICATION_API_URL")
            .unwrap_or_else(|_| DEFAULT_VERIFICATION_API_URL.to_string());
        Self::require_http_url("VERIFICATION_API_URL", &verification_api_url)?;

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            zerobounce_api_key,
            verification_api_url,
            request_timeout,
            log_level,
            ..Config::default()
        })
    }

    /// The verification credential, if one is configured and non-blank.
    pub fn verification_api_key(&self) -> Option<&str> {
        self.zerobounce_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }

    fn require_http_url(var: &str, value: &str) -> ConfigResult<()> {
        if !value.starts_with("http://") && !value.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: var.to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }
        Ok(())
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            store_api_url: String::new(),
            store_api_key: String::new(),
            zerobounce_api_key: None,
            verification_api_url: DEFAULT_VERIFICATION_API_URL.to_string(),
            request_timeout: 10,
            log_level: "error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    // Helper to set and unset env vars for testing
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.request_timeout, 10);
        assert_eq!(config.verification_api_url, DEFAULT_VERIFICATION_API_URL);
        assert!(config.verification_api_key().is_none());
    }

    #[test]
    fn test_blank_verification_key_is_absent() {
        let config = Config {
            zerobounce_api_key: Some("   ".to_string()),
            ..Config::default()
        };
        assert!(config.verification_api_key().is_none());

        let config = Config {
            zerobounce_api_key: Some("zb-key".to_string()),
            ..Config::default()
        };
        assert_eq!(config.verification_api_key(), Some("zb-key"));
    }

    #[test]
    #[serial]
    fn test_config_from_env_invalid_url() {
        let mut guard = EnvGuard::new();
        guard.set("STORE_API_URL", "not-a-url");
        guard.set("STORE_API_KEY", "test-key");

        let result = Config::from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "STORE_API_URL"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_empty_api_key() {
        let mut guard = EnvGuard::new();
        guard.set("STORE_API_URL", "https://db.example.com/rest/v1");
        guard.set("STORE_API_KEY", "   ");

        let result = Config::from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "STORE_API_KEY"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("STORE_API_URL", "https://db.example.com/rest/v1");
        guard.set("STORE_API_KEY", "store-key-123");
        guard.set("ZEROBOUNCE_API_KEY", "zb-key");
        guard.set("VERIFICATION_API_URL", "http://localhost:9999");
        guard.set("REQUEST_TIMEOUT", "3");

        let config = Config::from_env().expect("config should load");
        assert_eq!(config.store_api_url, "https://db.example.com/rest/v1");
        assert_eq!(config.store_api_key, "store-key-123");
        assert_eq!(config.verification_api_key(), Some("zb-key"));
        assert_eq!(config.verification_api_url, "http://localhost:9999");
        assert_eq!(config.request_timeout, 3);
    }

    #[test]
    #[serial]
    fn test_config_invalid_timeout() {
        let mut guard = EnvGuard::new();
        guard.set("STORE_API_URL", "https://db.example.com/rest/v1");
        guard.set("STORE_API_KEY", "store-key");
        guard.set("REQUEST_TIMEOUT", "soon");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "REQUEST_TIMEOUT"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_verification_config_without_store() {
        let mut guard = EnvGuard::new();
        guard.set("ZEROBOUNCE_API_KEY", "zb-key");
        guard.set("LOG_LEVEL", "stockdesk=debug");
        env::remove_var("STORE_API_URL");
        env::remove_var("STORE_API_KEY");

        let config = Config::verification_from_env().expect("validation settings should load");
        assert_eq!(config.verification_api_key(), Some("zb-key"));
        assert!(config.store_api_url.is_empty());
        assert_eq!(config.log_level, "stockdesk=debug");
    }

    #[test]
    #[serial]
    fn test_parse_env_u64() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U64", "42");

        assert_eq!(Config::parse_env_u64("TEST_U64", 10).unwrap(), 42);
        assert_eq!(Config::parse_env_u64("NONEXISTENT_STOCKDESK_VAR", 10).unwrap(), 10);
    }
}
