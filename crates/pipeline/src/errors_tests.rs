use super::*;

#[test]
fn test_rate_limit_is_retryable() {
    let err = LlmError::RateLimited {
        message: "quota".to_string(),
        retry_after: Some(Duration::from_secs(10)),
    };

    assert_eq!(
        err.retry_policy(),
        RetryPolicy::Retryable {
            after: Some(Duration::from_secs(10))
        }
    );
    assert!(err.to_string().contains("429"));
}

#[test]
fn test_other_llm_errors_are_not_retryable() {
    let errors = [
        LlmError::Status {
            status: 400,
            message: "bad".to_string(),
        },
        LlmError::Transport("reset".to_string()),
        LlmError::MalformedResponse("eof".to_string()),
    ];

    for err in errors {
        assert_eq!(err.retry_policy(), RetryPolicy::NonRetryable);
    }
}

#[test]
fn test_missing_secret_message_names_both_locations() {
    let err = MentorError::MissingSecret {
        name: "GMAIL_PASS".to_string(),
        remote_path: "/mentor/gmail_pass".to_string(),
    };

    let text = err.to_string();
    assert!(text.contains("GMAIL_PASS"));
    assert!(text.contains("/mentor/gmail_pass"));
}
