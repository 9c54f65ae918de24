//! Constructor methods for TermaiError

use super::types::TermaiError;

impl TermaiError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new LLM error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
            provider: None,
        }
    }

    /// Create an LLM error with provider
    pub fn llm_with_provider(message: impl Into<String>, provider: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
            provider: Some(provider.into()),
        }
    }

    /// Create a new HTTP error
    pub fn http(message: impl Into<String>, status_code: Option<u16>) -> Self {
        Self::Http {
            message: message.into(),
            status_code,
        }
    }

    /// Create a no-provider-available error
    pub fn no_provider(message: impl Into<String>) -> Self {
        Self::NoProviderAvailable {
            message: message.into(),
        }
    }

    /// Create a fallback timeout error
    pub fn fallback_timeout(seconds: u64) -> Self {
        Self::FallbackTimeout { seconds }
    }

    /// Create a fallback failure error
    pub fn fallback_failed(message: impl Into<String>) -> Self {
        Self::FallbackFailed {
            message: message.into(),
        }
    }

    /// Create a new invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
