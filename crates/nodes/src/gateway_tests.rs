use std::time::Duration;

use tokio::time::Instant;

use super::*;
use crate::test_support::{rate_limited, rate_limited_after, ScriptedProvider};
use pipeline::LlmError;

fn generator(provider: Arc<ScriptedProvider>) -> TaskGenerator {
    TaskGenerator::new(provider, RetryConfig::default())
}

fn issue_event() -> InboundEvent {
    InboundEvent::from_slice(
        br#"{"action":"opened","repository":{"full_name":"acme/widgets"},"sender":{"login":"alice"}}"#,
    )
}

#[tokio::test(start_paused = true)]
async fn test_success_returns_text_on_first_attempt() {
    let provider = ScriptedProvider::replying("### 🎯 The Mission\nDo it");
    let task = generator(provider.clone())
        .generate(&issue_event(), &EventType::from_header(Some("issues")))
        .await;

    assert_eq!(task, "### 🎯 The Mission\nDo it");
    assert_eq!(provider.calls(), 1);
    assert!(provider.prompts()[0].contains(
        "'opened issues' event just happened in the repository 'acme/widgets' by user 'alice'"
    ));
}

#[tokio::test(start_paused = true)]
async fn test_empty_success_becomes_placeholder() {
    let provider = ScriptedProvider::replying("");
    let task = generator(provider.clone())
        .complete(CompletionRequest::for_task("x"))
        .await;

    assert_eq!(task, EMPTY_RESPONSE);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_exhaustion_returns_busy_message() {
    let provider = ScriptedProvider::new(vec![Err(rate_limited())]);
    let start = Instant::now();

    let task = generator(provider.clone())
        .complete(CompletionRequest::for_task("x"))
        .await;

    assert_eq!(task, BUSY_MESSAGE);
    assert_eq!(provider.calls(), 3);
    // Two cooldowns: between attempts 1-2 and 2-3, none after the last.
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(90), "{elapsed:?}");
    assert!(elapsed < Duration::from_secs(135), "{elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_then_success_recovers() {
    let provider = ScriptedProvider::new(vec![
        Err(rate_limited()),
        Err(rate_limited()),
        Ok("task".to_string()),
    ]);

    let task = generator(provider.clone())
        .complete(CompletionRequest::for_task("x"))
        .await;

    assert_eq!(task, "task");
    assert_eq!(provider.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_non_rate_limit_failure_is_returned_without_retry() {
    let provider = ScriptedProvider::new(vec![Err(LlmError::Status {
        status: 400,
        message: "API key not valid".to_string(),
    })]);
    let start = Instant::now();

    let task = generator(provider.clone())
        .complete(CompletionRequest::for_task("x"))
        .await;

    assert!(task.starts_with(ERROR_PREFIX), "{task}");
    assert!(task.contains("API key not valid"));
    assert_eq!(provider.calls(), 1);
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_long_retry_after_does_not_extend_cooldown() {
    let provider = ScriptedProvider::new(vec![
        Err(rate_limited_after(86_400)),
        Ok("late".to_string()),
    ]);
    let start = Instant::now();

    let task = generator(provider.clone())
        .complete(CompletionRequest::for_task("x"))
        .await;

    assert_eq!(task, "late");
    assert_eq!(provider.calls(), 2);
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(45), "{elapsed:?}");
    assert!(elapsed < Duration::from_secs(46), "{elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn test_shorter_retry_after_keeps_cooldown() {
    let provider = ScriptedProvider::new(vec![Err(rate_limited_after(1)), Ok("late".to_string())]);
    let start = Instant::now();

    generator(provider)
        .complete(CompletionRequest::for_task("x"))
        .await;

    assert!(start.elapsed() >= Duration::from_secs(45));
}

#[tokio::test(start_paused = true)]
async fn test_single_attempt_policy_never_sleeps() {
    let provider = ScriptedProvider::new(vec![Err(rate_limited())]);
    let generator = TaskGenerator::new(
        provider.clone(),
        RetryConfig {
            max_attempts: 1,
            cooldown: Duration::from_secs(45),
        },
    );
    let start = Instant::now();

    assert_eq!(
        generator.complete(CompletionRequest::for_task("x")).await,
        BUSY_MESSAGE
    );
    assert_eq!(provider.calls(), 1);
    assert!(start.elapsed() < Duration::from_secs(1));
}
