//! Google Gemini provider implementation

use crate::config::provider::ProviderConfig;
use crate::error::{TermaiError, TermaiResult};
use crate::llm::provider_types::ModelParameters;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::instrument;

/// Google Gemini provider handler
pub struct GeminiProvider {
    config: ProviderConfig,
    model_params: ModelParameters,
    http_client: Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    pub fn new(
        config: ProviderConfig,
        model_params: ModelParameters,
        http_client: Client,
    ) -> Self {
        Self {
            config,
            model_params,
            http_client,
        }
    }

    /// Gemini content generation
    #[instrument(skip(self, prompt), level = "debug")]
    pub async fn generate(&self, prompt: &str) -> TermaiResult<String> {
        let api_key = self
            .config
            .get_api_key()
            .ok_or_else(|| TermaiError::llm_with_provider("Gemini API key not provided", "gemini"))?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.get_base_url(),
            self.model_params.model,
            api_key
        );

        let mut request_body = json!({
            "contents": [
                {"parts": [{"text": prompt}]}
            ],
        });

        let mut generation_config = json!({});
        if let Some(max_tokens) = self.model_params.max_tokens {
            generation_config["maxOutputTokens"] = json!(max_tokens);
        }
        if let Some(temperature) = self.model_params.temperature {
            generation_config["temperature"] = json!(temperature);
        }
        if generation_config
            .as_object()
            .is_some_and(|obj| !obj.is_empty())
        {
            request_body["generationConfig"] = generation_config;
        }

        let response = self
            .http_client
            .post(&url)
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TermaiError::http(
                format!("Gemini API error: {error_text}"),
                Some(status),
            ));
        }

        let body = response.text().await?;
        let response_json: Value = serde_json::from_str(&body)?;

        parse_gemini_response(&response_json)
    }
}

fn parse_gemini_response(response: &Value) -> TermaiResult<String> {
    response["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| TermaiError::llm("Gemini response missing candidate text"))
}
