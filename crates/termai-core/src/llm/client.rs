//! Provider client implementation
//!
//! A [`ProviderClient`] binds one provider backend to a validated
//! configuration and an HTTP client. It performs a single request per call;
//! retry and fallback policy live in [`crate::llm::fallback`].

use crate::config::provider::{ProviderConfig, resolve_env_api_key};
use crate::error::{TermaiError, TermaiResult};
use crate::llm::provider_types::{ModelParameters, ProviderKind};
use crate::llm::providers::{GeminiProvider, OpenAiProvider, ProviderInstance, TextProvider};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Client for a single LLM provider
pub struct ProviderClient {
    kind: ProviderKind,
    config: ProviderConfig,
    model_params: ModelParameters,
    provider_instance: ProviderInstance,
}

impl ProviderClient {
    /// Create a new provider client.
    ///
    /// Validates the configuration (including credential presence) and
    /// builds the HTTP client with connect/request timeouts and any custom
    /// headers.
    pub fn new(
        kind: ProviderKind,
        config: ProviderConfig,
        model_params: ModelParameters,
    ) -> TermaiResult<Self> {
        config
            .validate()
            .map_err(|e| TermaiError::config(format!("Invalid provider config: {e}")))?;

        let mut client_builder = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs));

        let mut headers = reqwest::header::HeaderMap::new();
        for (key, value) in &config.headers {
            if let (Ok(name), Ok(val)) = (
                reqwest::header::HeaderName::from_bytes(key.as_bytes()),
                reqwest::header::HeaderValue::from_str(value),
            ) {
                headers.insert(name, val);
            }
        }
        if !headers.is_empty() {
            client_builder = client_builder.default_headers(headers);
        }

        let http_client = client_builder.build().map_err(|e| {
            TermaiError::llm_with_provider(format!("Failed to create HTTP client: {e}"), kind.name())
        })?;

        debug!(
            provider = kind.name(),
            model = %model_params.model,
            connect_timeout_secs = config.connect_timeout_secs,
            request_timeout_secs = config.request_timeout_secs,
            "created provider client"
        );

        let provider_instance = match kind {
            ProviderKind::OpenAi => ProviderInstance::OpenAi(OpenAiProvider::new(
                config.clone(),
                model_params.clone(),
                http_client,
            )),
            ProviderKind::Gemini => ProviderInstance::Gemini(GeminiProvider::new(
                config.clone(),
                model_params.clone(),
                http_client,
            )),
        };

        Ok(Self {
            kind,
            config,
            model_params,
            provider_instance,
        })
    }

    /// Create a client from environment credentials.
    ///
    /// Returns `Ok(None)` when no credential is present for this provider,
    /// the absent-client sentinel. An unconfigured provider is never
    /// invoked, so absence is not an error.
    pub fn from_env(kind: ProviderKind) -> TermaiResult<Option<Self>> {
        let Some(api_key) = resolve_env_api_key(kind.name()) else {
            debug!(provider = kind.name(), "no credential in environment, provider unconfigured");
            return Ok(None);
        };

        let config = ProviderConfig::new(kind.name()).with_api_key(api_key);
        let model_params = ModelParameters::default_for(kind);
        Ok(Some(Self::new(kind, config, model_params)?))
    }

    /// Get the provider kind for this client
    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// Get the model name configured for this client
    pub fn model(&self) -> &str {
        &self.model_params.model
    }

    /// Get the provider configuration
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

#[async_trait]
impl TextProvider for ProviderClient {
    async fn generate(&self, prompt: &str) -> TermaiResult<String> {
        self.provider_instance.generate(prompt).await
    }
}
