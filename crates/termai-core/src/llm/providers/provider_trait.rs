//! Provider trait and unified enum

use crate::error::TermaiResult;
use async_trait::async_trait;

/// Unified trait for text-generating backends.
///
/// Retry and timeout policy deliberately does not live here; it belongs to
/// the fallback client, since policy differs per provider role.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Produce text for an opaque, fully-formed prompt
    async fn generate(&self, prompt: &str) -> TermaiResult<String>;
}

/// Unified provider enum that wraps all provider implementations
pub enum ProviderInstance {
    OpenAi(super::OpenAiProvider),
    Gemini(super::GeminiProvider),
}

#[async_trait]
impl TextProvider for ProviderInstance {
    async fn generate(&self, prompt: &str) -> TermaiResult<String> {
        match self {
            Self::OpenAi(p) => p.generate(prompt).await,
            Self::Gemini(p) => p.generate(prompt).await,
        }
    }
}
