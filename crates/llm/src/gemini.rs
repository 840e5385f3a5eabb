//! Gemini `generateContent` provider.

use std::time::Duration;

use async_trait::async_trait;
use pipeline::{CompletionRequest, LlmError, LlmProvider, LlmSettings, Secret};
use reqwest::{header::RETRY_AFTER, StatusCode};
use tracing::{debug, instrument, warn};

use crate::wire::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

const API_KEY_HEADER: &str = "x-goog-api-key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// [`LlmProvider`] backed by the Gemini REST API.
///
/// One instance is created at startup and shared; each call issues a fresh
/// request.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Secret,
}

impl GeminiProvider {
    /// Creates a provider for `settings.model` at `settings.base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Transport`] if the HTTP client cannot be built
    /// (e.g. no TLS backend).
    pub fn new(settings: &LlmSettings) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            settings.base_url.trim_end_matches('/'),
            settings.model
        );

        Ok(Self {
            client,
            endpoint,
            model: settings.model.clone(),
            api_key: settings.api_key.clone(),
        })
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, self.api_key.expose())
            .json(&GenerateContentRequest::from(request))
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_from_response(response).await);
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        let text = body.text();
        debug!(chars = text.len(), "Completion received");
        Ok(text)
    }
}

async fn error_from_response(response: reqwest::Response) -> LlmError {
    let status = response.status();
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs);

    let raw = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorEnvelope>(&raw) {
        Ok(envelope) => match envelope.error.status {
            Some(code) if !code.is_empty() => format!("{code}: {}", envelope.error.message),
            _ => envelope.error.message,
        },
        Err(_) => raw,
    };

    if status == StatusCode::TOO_MANY_REQUESTS {
        warn!(retry_after = ?retry_after, "Generative-text service is rate limiting");
        LlmError::RateLimited {
            message,
            retry_after,
        }
    } else {
        warn!(status = status.as_u16(), "Generative-text service returned an error");
        LlmError::Status {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
#[path = "gemini_tests.rs"]
mod tests;
