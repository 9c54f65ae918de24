//! Provider implementations

mod gemini;
mod openai;
mod provider_trait;

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;
pub use provider_trait::{ProviderInstance, TextProvider};
