//! # termai-core
//!
//! Core functionality for termai: provider clients for the OpenAI and
//! Gemini backends, the retry-then-fallback generation strategy, and the
//! progress indicator shown while a request is outstanding.
//!
//! The typical entry point is [`llm::FallbackClient`]:
//!
//! ```no_run
//! use termai_core::llm::FallbackClient;
//!
//! # async fn example() -> termai_core::error::TermaiResult<()> {
//! let client = FallbackClient::from_env()?;
//! let outcome = client.generate_with_fallback("explain chmod 644").await?;
//! if outcome.fell_back() {
//!     eprintln!("falling back ({:?})", outcome.reason);
//! }
//! println!("{}", outcome.text);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod llm;
pub mod progress;

pub use error::{TermaiError, TermaiResult};
pub use llm::{FallbackClient, FallbackReason, GenerationOutcome, ProviderClient, ProviderKind};
