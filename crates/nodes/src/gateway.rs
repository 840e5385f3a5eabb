//! LLM gateway: turns an event into a generated task.
//!
//! The gateway never fails. Every outcome, including upstream errors, is a
//! string destined for the notification body because the operator's inbox is
//! the only place failures are visible.

use std::sync::Arc;

use pipeline::{
    build_prompt, CompletionRequest, EventType, InboundEvent, LlmProvider, RetryConfig,
    RetryPolicy,
};
use tracing::{info, instrument, warn};

/// Body used when the service succeeded but produced no text.
pub const EMPTY_RESPONSE: &str = "AI returned empty response.";

/// Body used when every attempt was rate limited.
pub const BUSY_MESSAGE: &str = "The Mentor is busy. Check back soon!";

/// Prefix for non-retryable upstream failures.
pub const ERROR_PREFIX: &str = "Gemini Error: ";

/// Generates one learning task per event with bounded linear retry on
/// rate-limit responses.
#[derive(Clone)]
pub struct TaskGenerator {
    provider: Arc<dyn LlmProvider>,
    retry: RetryConfig,
}

impl TaskGenerator {
    /// Creates a generator over `provider` with the given retry budget.
    pub fn new(provider: Arc<dyn LlmProvider>, retry: RetryConfig) -> Self {
        Self { provider, retry }
    }

    /// Builds the prompt for `event` and returns the generated task text.
    #[instrument(skip_all, fields(event_type = %event_type, repository = event.repository()))]
    pub async fn generate(&self, event: &InboundEvent, event_type: &EventType) -> String {
        let prompt = build_prompt(event, event_type);
        self.complete(CompletionRequest::for_task(prompt)).await
    }

    /// Runs `request` through the retry policy.
    ///
    /// - rate limited: wait the fixed cooldown and try again, up to
    ///   `max_attempts` in total. A `Retry-After` from the service is logged
    ///   but never extends the wait;
    /// - any other error: return [`ERROR_PREFIX`] + detail at once;
    /// - empty success: [`EMPTY_RESPONSE`];
    /// - attempts exhausted: [`BUSY_MESSAGE`].
    pub async fn complete(&self, request: CompletionRequest) -> String {
        let max_attempts = self.retry.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            match self.provider.complete(&request).await {
                Ok(text) if text.is_empty() => {
                    warn!(attempt, "Completion was empty");
                    return EMPTY_RESPONSE.to_string();
                }
                Ok(text) => {
                    info!(attempt, chars = text.len(), "Task generated");
                    return text;
                }
                Err(e) => match e.retry_policy() {
                    RetryPolicy::Retryable { after } => {
                        warn!(
                            attempt,
                            max_attempts,
                            requested_delay = ?after,
                            error = %e,
                            "Rate limited"
                        );
                        if attempt < max_attempts {
                            tokio::time::sleep(self.retry.cooldown).await;
                        }
                    }
                    RetryPolicy::NonRetryable => {
                        warn!(attempt, error = %e, "Generation failed");
                        return format!("{ERROR_PREFIX}{e}");
                    }
                },
            }
        }

        warn!(max_attempts, "Retry budget exhausted");
        BUSY_MESSAGE.to_string()
    }
}

#[cfg(test)]
#[path = "gateway_tests.rs"]
mod tests;
