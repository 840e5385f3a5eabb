//! Top-level error and retry-policy types for the Hook Mentor domain.
//!
//! [`MentorError`] covers conditions that stop the process from starting or
//! stop a delivery from entering the pipeline. Errors raised by ports live
//! next to the port so every adapter speaks the same vocabulary:
//! [`LlmError`] for the generative-text service and [`SecretError`] for the
//! remote parameter store.
//!
//! [`RetryPolicy`] is a cross-cutting concern: any error type that participates
//! in retry decisions must be able to produce a [`RetryPolicy`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Retry semantics
// ---------------------------------------------------------------------------

/// Whether an error condition is safe to retry and, if so, after what delay.
///
/// Returned by infrastructure error types to let the LLM gateway decide
/// whether to re-invoke an operation.
///
/// - `Retryable` errors: rate-limit ("too many requests") responses only.
/// - `NonRetryable` errors: everything else. The failure detail is delivered
///   to the operator inside the notification body instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RetryPolicy {
    /// The operation may be retried.
    ///
    /// `after` optionally carries the delay the upstream service asked for
    /// (e.g. derived from a `Retry-After` header). It is informational: the
    /// gateway always waits its own fixed cooldown.
    Retryable {
        /// Back-off requested by the upstream service, if any.
        after: Option<Duration>,
    },
    /// The operation must not be retried.
    NonRetryable,
}

// ---------------------------------------------------------------------------
// Process-level errors
// ---------------------------------------------------------------------------

/// Errors that prevent the process from starting or a delivery from being
/// accepted.
#[derive(Debug, Error)]
pub enum MentorError {
    /// A required secret could not be resolved locally or remotely.
    ///
    /// Produced at startup; the process never serves requests without every
    /// required secret.
    #[error("Required secret '{name}' could not be resolved (remote path '{remote_path}')")]
    MissingSecret {
        /// Local (environment) name of the secret.
        name: String,
        /// Remote parameter-store path consulted on a local miss.
        remote_path: String,
    },

    /// The runtime configuration is invalid.
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Port errors
// ---------------------------------------------------------------------------

/// Failures reported by an [`crate::LlmProvider`].
#[derive(Debug, Error)]
pub enum LlmError {
    /// The service signalled "too many requests".
    #[error("429 Too Many Requests: {message}")]
    RateLimited {
        /// Upstream description of the rate limit.
        message: String,
        /// Delay requested by the service, if it sent one.
        retry_after: Option<Duration>,
    },

    /// The service answered with a non-success status other than 429.
    #[error("{status} {message}")]
    Status {
        /// HTTP status code returned by the service.
        status: u16,
        /// Upstream error description (or raw body when it was not JSON).
        message: String,
    },

    /// The request never produced a response (DNS, TLS, connection reset, ...).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service answered 2xx but the body could not be decoded.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl LlmError {
    /// Classifies this error for the LLM gateway's retry loop.
    pub fn retry_policy(&self) -> RetryPolicy {
        match self {
            LlmError::RateLimited { retry_after, .. } => RetryPolicy::Retryable {
                after: *retry_after,
            },
            _ => RetryPolicy::NonRetryable,
        }
    }
}

/// Failures reported by a [`crate::ParameterStore`].
#[derive(Debug, Error)]
pub enum SecretError {
    /// The parameter does not exist at the requested path.
    #[error("parameter '{path}' not found")]
    NotFound {
        /// The remote path that was queried.
        path: String,
    },

    /// The store could not be reached or refused the request.
    #[error("parameter store unavailable while reading '{path}': {detail}")]
    Unavailable {
        /// The remote path that was queried.
        path: String,
        /// Provider-specific failure description.
        detail: String,
    },
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;
