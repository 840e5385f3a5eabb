//! Port traits implemented by infrastructure crates.
//!
//! The orchestration layer (`nodes`) only ever sees these traits, so tests
//! substitute hand-written fakes and production wires the real adapters in
//! the `cli` composition root.

use async_trait::async_trait;

use crate::{CompletionRequest, LlmError, Notification, SecretError};

/// A generative-text completion service.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Returns the generated text for `request`.
    ///
    /// A successful call may return an empty string (e.g. every candidate was
    /// filtered); callers decide what to do with that.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

/// Delivers a [`Notification`] to the operator.
///
/// Delivery is best-effort: implementations log and swallow every failure.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &Notification);
}

/// A remote encrypted key/value store.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Reads and decrypts the parameter at `path`.
    async fn get_parameter(&self, path: &str) -> Result<String, SecretError>;
}
