//! LLM client functionality
//!
//! The layering mirrors the request path: provider handlers speak one wire
//! protocol each, [`client::ProviderClient`] wraps a handler with validated
//! config and an HTTP client, and [`fallback::FallbackClient`] owns both
//! clients and decides who answers.

pub mod client;
pub mod fallback;
pub mod provider_types;
pub mod providers;

#[cfg(test)]
mod fallback_tests;

pub use client::ProviderClient;
pub use fallback::{FallbackClient, FallbackReason, GenerationOutcome, RetryPolicy};
pub use provider_types::{ModelParameters, ProviderKind};
pub use providers::TextProvider;
