//! Provider fallback orchestration
//!
//! The primary backend is retried because transient faults (rate limits,
//! flaky networks) are common and cheap to retry. The fallback backend is
//! the last resort: it gets exactly one attempt under a hard wall-clock
//! budget so the command never hangs indefinitely. Every outcome reports
//! which provider actually produced the text and, when relevant, why the
//! fallback happened, so the caller can surface a visible notice.

use crate::error::{TermaiError, TermaiResult};
use crate::llm::client::ProviderClient;
use crate::llm::provider_types::ProviderKind;
use crate::llm::providers::TextProvider;
use crate::progress::{ProgressIndicator, ProgressSink, stdout_sink};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, sleep, timeout};
use tracing::{debug, info, warn};

/// Status-line phases shown while a request is outstanding
pub const THINKING_PHASES: [&str; 2] = ["Thinking", "Analysing"];

/// Retry and timeout policy for the two provider roles.
///
/// Backoff applies to the primary only; the fallback gets a single attempt
/// bounded by `fallback_timeout`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Attempts against the primary provider
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Multiplier applied to the delay after each failed attempt
    pub backoff_multiplier: f64,
    /// Hard wall-clock budget for the fallback provider
    pub fallback_timeout: Duration,
    /// Redraw interval for the progress indicator
    pub progress_interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            backoff_multiplier: 2.0,
            fallback_timeout: Duration::from_secs(7),
            progress_interval: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Delay inserted after failed attempt number `attempt` (1-based):
    /// 0.5s, 1s, 2s with the default policy.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.initial_delay
            .mul_f64(self.backoff_multiplier.powi(attempt.saturating_sub(1) as i32))
    }
}

/// Why the answering provider was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The provider answered on its own merits
    Ok,
    /// The primary exhausted its retry budget and the fallback answered
    PrimaryFailed,
}

/// The structured result of one orchestrated generation call.
///
/// Invariant: `reason == PrimaryFailed` implies `provider` is the fallback
/// backend, and `error_detail` is populated iff `reason == PrimaryFailed`.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// Raw model response text
    pub text: String,
    /// Backend that actually produced the text
    pub provider: ProviderKind,
    /// Why that backend answered
    pub reason: FallbackReason,
    /// Wall-clock time of the answering backend's own phase
    pub duration: Duration,
    /// Last primary failure, when the fallback had to answer
    pub error_detail: Option<String>,
}

impl GenerationOutcome {
    /// Duration of the answering phase in milliseconds
    pub fn duration_ms(&self) -> u128 {
        self.duration.as_millis()
    }

    /// Whether the caller should surface a "falling back" notice
    pub fn fell_back(&self) -> bool {
        self.reason == FallbackReason::PrimaryFailed
    }
}

struct ProviderSlot {
    kind: ProviderKind,
    client: Arc<dyn TextProvider>,
}

/// Client that tries the primary provider with bounded retries and falls
/// back to the secondary under a hard timeout.
///
/// Both provider clients are constructed once and owned here; there is no
/// ambient global client state.
pub struct FallbackClient {
    primary: Option<ProviderSlot>,
    secondary: Option<ProviderSlot>,
    policy: RetryPolicy,
    progress_sink: ProgressSink,
}

impl FallbackClient {
    /// Create a fallback client from two optional provider clients
    pub fn new(primary: Option<ProviderClient>, secondary: Option<ProviderClient>) -> Self {
        let slot = |client: ProviderClient| ProviderSlot {
            kind: client.kind(),
            client: Arc::new(client) as Arc<dyn TextProvider>,
        };
        Self {
            primary: primary.map(slot),
            secondary: secondary.map(slot),
            policy: RetryPolicy::default(),
            progress_sink: stdout_sink(),
        }
    }

    /// Create a fallback client from environment credentials.
    ///
    /// A provider with no credential is simply left out; availability is
    /// checked per call, not at construction.
    pub fn from_env() -> TermaiResult<Self> {
        let primary = ProviderClient::from_env(ProviderKind::OpenAi)?;
        let secondary = ProviderClient::from_env(ProviderKind::Gemini)?;
        debug!(
            primary_configured = primary.is_some(),
            secondary_configured = secondary.is_some(),
            "initialized fallback client"
        );
        Ok(Self::new(primary, secondary))
    }

    /// Create a fallback client from raw provider implementations.
    ///
    /// The first slot takes the primary role, the second the fallback role.
    pub fn with_providers(
        primary: Option<Arc<dyn TextProvider>>,
        secondary: Option<Arc<dyn TextProvider>>,
    ) -> Self {
        Self {
            primary: primary.map(|client| ProviderSlot {
                kind: ProviderKind::OpenAi,
                client,
            }),
            secondary: secondary.map(|client| ProviderSlot {
                kind: ProviderKind::Gemini,
                client,
            }),
            policy: RetryPolicy::default(),
            progress_sink: stdout_sink(),
        }
    }

    /// Override the retry/timeout policy
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Override where the progress indicator draws
    pub fn with_progress_sink(mut self, sink: ProgressSink) -> Self {
        self.progress_sink = sink;
        self
    }

    /// Whether the primary provider is configured
    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// Whether the fallback provider is configured
    pub fn has_secondary(&self) -> bool {
        self.secondary.is_some()
    }

    /// Whether any provider is configured
    pub fn is_configured(&self) -> bool {
        self.has_primary() || self.has_secondary()
    }

    /// Generate text for a prompt using the best available provider.
    ///
    /// Tries the primary with sequential retries and exponential backoff,
    /// then the fallback under a hard timeout. Single-attempt failures and
    /// primary exhaustion are absorbed into outcome metadata; only terminal
    /// conditions (no usable provider, fallback timeout, fallback failure)
    /// propagate as errors.
    pub async fn generate_with_fallback(&self, prompt: &str) -> TermaiResult<GenerationOutcome> {
        let mut primary_failure: Option<String> = None;

        if let Some(primary) = &self.primary {
            let start = Instant::now();
            let progress = ProgressIndicator::start(
                &THINKING_PHASES,
                self.policy.progress_interval,
                Arc::clone(&self.progress_sink),
            );

            let mut last_error: Option<TermaiError> = None;
            for attempt in 1..=self.policy.max_attempts {
                match primary.client.generate(prompt).await {
                    Ok(text) => {
                        // Duration reflects the request, not indicator teardown.
                        let duration = start.elapsed();
                        progress.stop().await;
                        if attempt > 1 {
                            info!(provider = primary.kind.name(), attempt, "request succeeded after retry");
                        }
                        return Ok(GenerationOutcome {
                            text,
                            provider: primary.kind,
                            reason: FallbackReason::Ok,
                            duration,
                            error_detail: None,
                        });
                    }
                    Err(error) => {
                        warn!(
                            provider = primary.kind.name(),
                            attempt,
                            max_attempts = self.policy.max_attempts,
                            error = %error,
                            "primary attempt failed"
                        );
                        last_error = Some(error);
                        // No sleep after the final attempt; no retry follows it.
                        if attempt < self.policy.max_attempts {
                            sleep(self.policy.backoff_delay(attempt)).await;
                        }
                    }
                }
            }

            progress.stop().await;
            primary_failure = last_error.map(|e| e.to_string());
            warn!(
                provider = primary.kind.name(),
                "primary retry budget exhausted"
            );
        }

        let Some(secondary) = &self.secondary else {
            return Err(if self.primary.is_some() {
                TermaiError::no_provider("No AI client is available (both providers failed).")
            } else {
                TermaiError::no_provider("No AI client is available.")
            });
        };

        let start = Instant::now();
        let progress = ProgressIndicator::start(
            &THINKING_PHASES,
            self.policy.progress_interval,
            Arc::clone(&self.progress_sink),
        );

        // The call runs on its own task so an expired wait leaves it
        // detached rather than aborted; a late result is discarded.
        let client = Arc::clone(&secondary.client);
        let owned_prompt = prompt.to_string();
        let call = tokio::spawn(async move { client.generate(&owned_prompt).await });

        match timeout(self.policy.fallback_timeout, call).await {
            Ok(Ok(Ok(text))) => {
                let duration = start.elapsed();
                progress.stop().await;
                let reason = if primary_failure.is_some() {
                    FallbackReason::PrimaryFailed
                } else {
                    FallbackReason::Ok
                };
                info!(
                    provider = secondary.kind.name(),
                    fell_back = primary_failure.is_some(),
                    "fallback provider answered"
                );
                Ok(GenerationOutcome {
                    text,
                    provider: secondary.kind,
                    reason,
                    duration,
                    error_detail: primary_failure,
                })
            }
            Ok(Ok(Err(error))) => {
                progress.stop().await;
                Err(TermaiError::fallback_failed(error.to_string()))
            }
            Ok(Err(join_error)) => {
                progress.stop().await;
                Err(TermaiError::fallback_failed(join_error.to_string()))
            }
            Err(_elapsed) => {
                progress.stop().await;
                warn!(
                    provider = secondary.kind.name(),
                    budget_secs = self.policy.fallback_timeout.as_secs(),
                    "fallback provider exceeded its budget"
                );
                Err(TermaiError::fallback_timeout(
                    self.policy.fallback_timeout.as_secs(),
                ))
            }
        }
    }
}
