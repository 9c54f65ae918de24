//! Provider-specific configuration
//!
//! Credentials are read from the environment only; there are no hardcoded
//! defaults that look like real keys. A provider with no resolvable key is
//! simply unconfigured, which is a configuration fact, not an error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard environment variables checked for a provider's API key,
/// in priority order.
pub fn standard_env_vars(provider: &str) -> &'static [&'static str] {
    match provider {
        "openai" => &["OPENAI_API_KEY"],
        "gemini" => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
        _ => &[],
    }
}

/// Resolve an API key for a provider from the standard environment variables.
/// Empty values are treated as absent.
pub fn resolve_env_api_key(provider: &str) -> Option<String> {
    standard_env_vars(provider)
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.trim().is_empty())
}

/// Configuration for a specific LLM provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name (openai, gemini)
    pub name: String,
    /// API key; when `None` the key is resolved from the environment
    pub api_key: Option<String>,
    /// Base URL override
    pub base_url: Option<String>,
    /// Extra HTTP headers
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: "openai".to_string(),
            api_key: None,
            base_url: None,
            headers: HashMap::new(),
            connect_timeout_secs: 10,
            request_timeout_secs: 120,
        }
    }
}

impl ProviderConfig {
    /// Create a new provider config
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a custom header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set connection and request timeouts
    pub fn with_timeouts(mut self, connect_secs: u64, request_secs: u64) -> Self {
        self.connect_timeout_secs = connect_secs;
        self.request_timeout_secs = request_secs;
        self
    }

    /// Get the effective API key (explicit config wins over environment)
    pub fn get_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| resolve_env_api_key(&self.name))
    }

    /// Get the effective base URL for this provider
    pub fn get_base_url(&self) -> String {
        if let Some(base_url) = &self.base_url {
            base_url.clone()
        } else {
            match self.name.as_str() {
                "openai" => "https://api.openai.com/v1".to_string(),
                "gemini" => "https://generativelanguage.googleapis.com".to_string(),
                _ => "http://localhost:8000".to_string(),
            }
        }
    }

    /// Validate the provider configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("Provider name cannot be empty".to_string());
        }

        if self.get_api_key().is_none() {
            return Err(format!(
                "API key is required for provider '{}'. Set it in config or environment variables",
                self.name
            ));
        }

        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err("Timeouts must be greater than zero".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods() {
        let config = ProviderConfig::new("openai")
            .with_api_key("test-key")
            .with_base_url("https://example.com/v1")
            .with_header("X-Test", "1")
            .with_timeouts(5, 30);

        assert_eq!(config.name, "openai");
        assert_eq!(config.get_api_key().as_deref(), Some("test-key"));
        assert_eq!(config.get_base_url(), "https://example.com/v1");
        assert_eq!(config.headers.get("X-Test").map(String::as_str), Some("1"));
        assert_eq!(config.connect_timeout_secs, 5);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_default_base_urls() {
        assert_eq!(
            ProviderConfig::new("openai").get_base_url(),
            "https://api.openai.com/v1"
        );
        assert_eq!(
            ProviderConfig::new("gemini").get_base_url(),
            "https://generativelanguage.googleapis.com"
        );
    }

    #[test]
    fn test_validate_requires_api_key() {
        let config = ProviderConfig::new("custom-backend");
        assert!(config.validate().is_err());

        let config = config.with_api_key("k");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_api_key_treated_as_absent() {
        let config = ProviderConfig::new("custom-backend").with_api_key("  ");
        assert!(config.get_api_key().is_none());
    }

    #[test]
    fn test_standard_env_vars() {
        assert_eq!(standard_env_vars("openai"), &["OPENAI_API_KEY"]);
        assert_eq!(
            standard_env_vars("gemini"),
            &["GEMINI_API_KEY", "GOOGLE_API_KEY"]
        );
        assert!(standard_env_vars("other").is_empty());
    }
}
