//! OpenAI provider implementation

use crate::config::provider::ProviderConfig;
use crate::error::{TermaiError, TermaiResult};
use crate::llm::provider_types::ModelParameters;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::instrument;

/// OpenAI provider handler
pub struct OpenAiProvider {
    config: ProviderConfig,
    model_params: ModelParameters,
    http_client: Client,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider
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

    /// OpenAI chat completion
    #[instrument(skip(self, prompt), level = "debug")]
    pub async fn generate(&self, prompt: &str) -> TermaiResult<String> {
        let api_key = self
            .config
            .get_api_key()
            .ok_or_else(|| TermaiError::llm_with_provider("OpenAI API key not provided", "openai"))?;

        let url = format!("{}/chat/completions", self.config.get_base_url());

        let mut request_body = json!({
            "model": self.model_params.model,
            "messages": [
                {"role": "system", "content": "You are a helpful assistant."},
                {"role": "user", "content": prompt},
            ],
        });

        if let Some(max_tokens) = self.model_params.max_tokens {
            request_body["max_tokens"] = json!(max_tokens);
        }
        if let Some(temperature) = self.model_params.temperature {
            request_body["temperature"] = json!(temperature);
        }

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TermaiError::http(
                format!("OpenAI API error: {error_text}"),
                Some(status),
            ));
        }

        let body = response.text().await?;
        let response_json: Value = serde_json::from_str(&body)?;

        parse_openai_response(&response_json)
    }
}

fn parse_openai_response(response: &Value) -> TermaiResult<String> {
    response["choices"][0]["message"]["content"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| TermaiError::llm("OpenAI response missing message content"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_openai_response() {
        let response = json!({
            "choices": [{"message": {"role": "assistant", "content": "hello"}}]
        });
        assert_eq!(parse_openai_response(&response).unwrap(), "hello");
    }

    #[test]
    fn test_parse_openai_response_missing_content() {
        let response = json!({"choices": []});
        assert!(parse_openai_response(&response).is_err());
    }
}
