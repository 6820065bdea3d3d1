//! Configuration management

use std::fmt;

use tracing::info;

/// Environment variable holding the DeepL authentication key
pub const API_KEY_ENV: &str = "DEEPL_API_KEY";

/// Environment variable overriding the upstream base URL
pub const API_URL_ENV: &str = "DEEPL_API_URL";

/// Environment variable setting the HTTP client timeout
pub const TIMEOUT_ENV: &str = "REQUEST_TIMEOUT_MS";

/// Base URL for DeepL Pro keys
pub const PRO_API_URL: &str = "https://api.deepl.com";

/// Base URL for DeepL Free keys
pub const FREE_API_URL: &str = "https://api-free.deepl.com";

/// Configuration for the DeepL client
///
/// The key is read once at startup and shared read-only afterwards.
#[derive(Clone)]
pub struct DeeplConfig {
    /// DeepL authentication key, sent as `DeepL-Auth-Key <key>`
    pub api_key: String,
    /// Base URL without a trailing path, e.g. `https://api.deepl.com`
    pub api_endpoint: String,
    /// `None` keeps the HTTP client's default
    pub timeout_ms: Option<u64>,
}

impl fmt::Debug for DeeplConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeeplConfig")
            .field("api_key", &"<redacted>")
            .field("api_endpoint", &self.api_endpoint)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl DeeplConfig {
    /// Create a config for `api_key`, picking the endpoint from the key type
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        let api_endpoint = default_endpoint(&api_key).to_string();
        Self {
            api_key,
            api_endpoint,
            timeout_ms: None,
        }
    }

    /// Override the base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = endpoint.into();
        self
    }

    /// Set the HTTP client timeout in milliseconds
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("{} environment variable is required", API_KEY_ENV))?;

        let mut config = Self::new(api_key);

        if let Ok(endpoint) = std::env::var(API_URL_ENV) {
            config.api_endpoint = endpoint;
        }

        if let Ok(timeout) = std::env::var(TIMEOUT_ENV) {
            config.timeout_ms = Some(timeout.parse::<u64>()?);
        }

        info!(endpoint = %config.api_endpoint, "Loaded DeepL configuration");
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(anyhow::anyhow!("API key is required"));
        }

        if self.api_endpoint.trim().is_empty() {
            return Err(anyhow::anyhow!("API endpoint is required"));
        }

        if self.timeout_ms == Some(0) {
            return Err(anyhow::anyhow!("timeout must be greater than 0"));
        }

        Ok(())
    }

    /// Whether the key belongs to the free API tier
    pub fn is_free_key(&self) -> bool {
        is_free_key(&self.api_key)
    }

    /// Full URL for an API path such as `/v2/translate`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_endpoint.trim_end_matches('/'), path)
    }
}

fn is_free_key(api_key: &str) -> bool {
    api_key.ends_with(":fx")
}

fn default_endpoint(api_key: &str) -> &'static str {
    if is_free_key(api_key) {
        FREE_API_URL
    } else {
        PRO_API_URL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_key_uses_free_endpoint() {
        let config = DeeplConfig::new("abc-123:fx");
        assert!(config.is_free_key());
        assert_eq!(config.api_endpoint, FREE_API_URL);
    }

    #[test]
    fn test_pro_key_uses_pro_endpoint() {
        let config = DeeplConfig::new("abc-123");
        assert!(!config.is_free_key());
        assert_eq!(config.api_endpoint, PRO_API_URL);
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = DeeplConfig::new("k").with_endpoint("http://localhost:1234/");
        assert_eq!(config.url("/v2/languages"), "http://localhost:1234/v2/languages");
    }

    #[test]
    fn test_config_validation() {
        let config = DeeplConfig::new("test_key").with_timeout_ms(5000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_missing_key() {
        let config = DeeplConfig::new("  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let config = DeeplConfig::new("k").with_timeout_ms(0);
        assert!(config.validate().is_err());
    }

    // The only test touching the process environment; keep every env case here
    #[test]
    fn test_from_env_requires_key() {
        let saved: Vec<(&str, Option<String>)> = [API_KEY_ENV, API_URL_ENV, TIMEOUT_ENV]
            .into_iter()
            .map(|name| (name, std::env::var(name).ok()))
            .collect();
        std::env::remove_var(API_URL_ENV);
        std::env::remove_var(TIMEOUT_ENV);

        std::env::remove_var(API_KEY_ENV);
        let err = DeeplConfig::from_env().unwrap_err();
        assert!(err.to_string().contains(API_KEY_ENV));

        std::env::set_var(API_KEY_ENV, "   ");
        assert!(DeeplConfig::from_env().is_err());

        std::env::set_var(API_KEY_ENV, "abc:fx");
        let config = DeeplConfig::from_env().unwrap();
        assert_eq!(config.api_key, "abc:fx");
        assert_eq!(config.api_endpoint, FREE_API_URL);
        assert_eq!(config.timeout_ms, None);

        std::env::set_var(API_URL_ENV, "http://localhost:9999");
        std::env::set_var(TIMEOUT_ENV, "2500");
        let config = DeeplConfig::from_env().unwrap();
        assert_eq!(config.api_endpoint, "http://localhost:9999");
        assert_eq!(config.timeout_ms, Some(2500));

        std::env::set_var(TIMEOUT_ENV, "soon");
        assert!(DeeplConfig::from_env().is_err());

        for (name, value) in saved {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = DeeplConfig::new("super-secret");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
