//! Unit tests for the fallback client
//!
//! All timing-sensitive assertions run under tokio's paused clock, so
//! backoff sleeps and the fallback budget advance deterministically.

use crate::error::{TermaiError, TermaiResult};
use crate::llm::fallback::{FallbackClient, FallbackReason, RetryPolicy};
use crate::llm::provider_types::ProviderKind;
use crate::llm::providers::TextProvider;
use crate::progress::ProgressSink;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::{Instant, sleep};

/// Provider that replays a fixed script of responses, optionally delaying
/// each one on the tokio clock.
struct ScriptedProvider {
    responses: Mutex<VecDeque<TermaiResult<String>>>,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    fn new(responses: Vec<TermaiResult<String>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        })
    }

    fn with_delay(responses: Vec<TermaiResult<String>>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            delay,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextProvider for ScriptedProvider {
    async fn generate(&self, _prompt: &str) -> TermaiResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(TermaiError::llm("script exhausted")))
    }
}

struct NullSink;

impl Write for NullSink {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn null_sink() -> ProgressSink {
    Arc::new(Mutex::new(NullSink))
}

fn client(
    primary: Option<Arc<ScriptedProvider>>,
    secondary: Option<Arc<ScriptedProvider>>,
) -> FallbackClient {
    FallbackClient::with_providers(
        primary.map(|p| p as Arc<dyn TextProvider>),
        secondary.map(|p| p as Arc<dyn TextProvider>),
    )
    .with_progress_sink(null_sink())
}

fn ok(text: &str) -> TermaiResult<String> {
    Ok(text.to_string())
}

fn fail(message: &str) -> TermaiResult<String> {
    Err(TermaiError::llm(message))
}

#[tokio::test(start_paused = true)]
async fn test_primary_first_attempt_success_no_sleep() {
    let primary = ScriptedProvider::new(vec![ok("answer")]);
    let fallback = client(Some(Arc::clone(&primary)), None);

    let start = Instant::now();
    let outcome = fallback.generate_with_fallback("prompt").await.unwrap();

    assert_eq!(outcome.text, "answer");
    assert_eq!(outcome.provider, ProviderKind::OpenAi);
    assert_eq!(outcome.reason, FallbackReason::Ok);
    assert!(outcome.error_detail.is_none());
    assert_eq!(primary.calls(), 1);
    // No backoff sleep on the success path.
    assert!(start.elapsed() < Duration::from_millis(100));
}

#[tokio::test(start_paused = true)]
async fn test_primary_succeeds_on_third_attempt_with_two_backoffs() {
    let primary = ScriptedProvider::new(vec![fail("503"), fail("503"), ok("third time")]);
    let fallback = client(Some(Arc::clone(&primary)), None);

    let start = Instant::now();
    let outcome = fallback.generate_with_fallback("prompt").await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(outcome.text, "third time");
    assert_eq!(outcome.provider, ProviderKind::OpenAi);
    assert_eq!(outcome.reason, FallbackReason::Ok);
    assert_eq!(primary.calls(), 3);
    // Exactly two backoff sleeps: 0.5s then 1.0s.
    assert!(elapsed >= Duration::from_millis(1500));
    assert!(elapsed < Duration::from_millis(1700));
}

#[tokio::test(start_paused = true)]
async fn test_primary_unconfigured_secondary_answers() {
    let secondary = ScriptedProvider::with_delay(vec![ok("from fallback")], Duration::from_secs(2));
    let fallback = client(None, Some(Arc::clone(&secondary)));

    let outcome = fallback.generate_with_fallback("prompt").await.unwrap();

    assert_eq!(outcome.text, "from fallback");
    assert_eq!(outcome.provider, ProviderKind::Gemini);
    assert_eq!(outcome.reason, FallbackReason::Ok);
    assert!(outcome.error_detail.is_none());
    assert!(outcome.duration_ms() >= 2000);
    assert!(outcome.duration_ms() < 2200);
}

#[tokio::test(start_paused = true)]
async fn test_primary_exhausted_secondary_answers() {
    let primary = ScriptedProvider::new(vec![
        fail("rate limited"),
        fail("rate limited"),
        fail("rate limited"),
    ]);
    let secondary = ScriptedProvider::with_delay(vec![ok("rescued")], Duration::from_secs(3));
    let fallback = client(Some(Arc::clone(&primary)), Some(Arc::clone(&secondary)));

    let outcome = fallback.generate_with_fallback("prompt").await.unwrap();

    assert_eq!(outcome.text, "rescued");
    // Reason PrimaryFailed always pairs with the fallback backend.
    assert_eq!(outcome.provider, ProviderKind::Gemini);
    assert_eq!(outcome.reason, FallbackReason::PrimaryFailed);
    assert!(outcome.fell_back());
    let detail = outcome.error_detail.as_deref().unwrap();
    assert!(detail.contains("rate limited"));
    assert_eq!(primary.calls(), 3);
    assert_eq!(secondary.calls(), 1);
    // Duration is measured from the fallback's own start, not the whole call.
    assert!(outcome.duration_ms() >= 3000);
    assert!(outcome.duration_ms() < 3200);
}

#[tokio::test(start_paused = true)]
async fn test_secondary_timeout_fires_at_budget_not_at_response() {
    let secondary = ScriptedProvider::with_delay(vec![ok("too late")], Duration::from_secs(10));
    let fallback = client(None, Some(Arc::clone(&secondary)));

    let start = Instant::now();
    let error = fallback.generate_with_fallback("prompt").await.unwrap_err();
    let elapsed = start.elapsed();

    assert!(matches!(error, TermaiError::FallbackTimeout { seconds: 7 }));
    assert_eq!(
        error.to_string(),
        "Gemini fallback timed out after 7 seconds"
    );
    // The caller is released at the 7s mark, not after the 10s response.
    assert!(elapsed >= Duration::from_secs(7));
    assert!(elapsed < Duration::from_millis(7500));
}

#[tokio::test(start_paused = true)]
async fn test_secondary_within_budget_still_succeeds() {
    let secondary =
        ScriptedProvider::with_delay(vec![ok("just in time")], Duration::from_millis(6900));
    let fallback = client(None, Some(Arc::clone(&secondary)));

    let outcome = fallback.generate_with_fallback("prompt").await.unwrap();
    assert_eq!(outcome.text, "just in time");
    assert!(outcome.duration_ms() >= 6900);
}

#[tokio::test(start_paused = true)]
async fn test_neither_provider_configured_fails_immediately() {
    let fallback = FallbackClient::with_providers(None, None).with_progress_sink(null_sink());
    assert!(!fallback.is_configured());

    let start = Instant::now();
    let error = fallback.generate_with_fallback("prompt").await.unwrap_err();

    assert!(error.is_no_provider());
    assert_eq!(error.to_string(), "No AI client is available.");
    // Immediate failure: no retries, no backoff, no timeout wait.
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_primary_exhausted_without_secondary_fails() {
    let primary = ScriptedProvider::new(vec![fail("boom"), fail("boom"), fail("boom")]);
    let fallback = client(Some(Arc::clone(&primary)), None);

    let error = fallback.generate_with_fallback("prompt").await.unwrap_err();

    assert!(error.is_no_provider());
    assert_eq!(
        error.to_string(),
        "No AI client is available (both providers failed)."
    );
    assert_eq!(primary.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_secondary_non_timeout_failure_wraps_detail() {
    let secondary = ScriptedProvider::new(vec![fail("invalid response shape")]);
    let fallback = client(None, Some(Arc::clone(&secondary)));

    let error = fallback.generate_with_fallback("prompt").await.unwrap_err();

    match error {
        TermaiError::FallbackFailed { message } => {
            assert!(message.contains("invalid response shape"));
        }
        other => panic!("expected FallbackFailed, got {other:?}"),
    }
}

#[test]
fn test_backoff_delay_schedule() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.backoff_delay(1), Duration::from_millis(500));
    assert_eq!(policy.backoff_delay(2), Duration::from_millis(1000));
    assert_eq!(policy.backoff_delay(3), Duration::from_millis(2000));
}
