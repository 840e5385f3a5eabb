//! Process-wide configuration.
//!
//! [`MentorConfig`] is built exactly once at startup (see the `secrets` crate)
//! and shared read-only behind an `Arc` for the life of the process. Secrets
//! are not rotated; a revoked credential requires a restart.

use std::time::Duration;

use crate::{MentorError, Secret};

// ---------------------------------------------------------------------------
// Secret names
// ---------------------------------------------------------------------------

/// A secret's local (environment) name and its fallback remote path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretSpec {
    /// Environment variable consulted first.
    pub name: &'static str,
    /// Parameter-store path consulted on a local miss.
    pub remote_path: &'static str,
}

pub const LLM_API_KEY: SecretSpec = SecretSpec {
    name: "GEMINI_API_KEY",
    remote_path: "/mentor/gemini_key",
};

pub const MAIL_PASSWORD: SecretSpec = SecretSpec {
    name: "GMAIL_PASS",
    remote_path: "/mentor/gmail_pass",
};

pub const MAIL_USER: SecretSpec = SecretSpec {
    name: "GMAIL_USER",
    remote_path: "/mentor/gmail_user",
};

pub const WEBHOOK_SECRET: SecretSpec = SecretSpec {
    name: "WEBHOOK_SECRET",
    remote_path: "/mentor/webhook_secret",
};

/// Environment-only, display use.
pub const GITHUB_USERNAME_VAR: &str = "GITHUB_USERNAME";

// ---------------------------------------------------------------------------
// Execution mode
// ---------------------------------------------------------------------------

/// How the dispatcher completes a delivery relative to the HTTP response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Generate and notify before responding. Required on hosts that freeze
    /// the process once the response is returned (function-per-invocation).
    Synchronous,
    /// Respond immediately and finish on a background task. Used by the
    /// long-running server.
    Detached,
}

impl ExecutionMode {
    /// Environment variable set by the serverless host on every invocation.
    pub const SERVERLESS_MARKER_VAR: &'static str = "AWS_LAMBDA_FUNCTION_NAME";

    /// Explicit override: `sync` or `detached`.
    pub const OVERRIDE_VAR: &'static str = "MENTOR_EXECUTION_MODE";

    /// Picks the mode from the override (when set) or the serverless marker.
    ///
    /// # Errors
    ///
    /// Returns [`MentorError::ConfigurationError`] for an unknown override.
    pub fn detect(
        serverless_marker: Option<&str>,
        override_value: Option<&str>,
    ) -> Result<Self, MentorError> {
        match override_value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) if v.eq_ignore_ascii_case("sync") => Ok(Self::Synchronous),
            Some(v) if v.eq_ignore_ascii_case("detached") => Ok(Self::Detached),
            Some(other) => Err(MentorError::ConfigurationError {
                message: format!(
                    "{} must be 'sync' or 'detached', got '{other}'",
                    Self::OVERRIDE_VAR
                ),
            }),
            None if serverless_marker.is_some() => Ok(Self::Synchronous),
            None => Ok(Self::Detached),
        }
    }
}

// ---------------------------------------------------------------------------
// Settings groups
// ---------------------------------------------------------------------------

/// Bounded linear retry for rate-limited completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Fixed wait between a rate-limited attempt and the next one.
    pub cooldown: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            cooldown: Duration::from_secs(45),
        }
    }
}

/// Mail relay identity and endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSettings {
    /// Account address; also the sender and the sole recipient.
    pub user: String,
    pub password: Secret,
    pub smtp_host: String,
    /// Implicit-TLS port.
    pub smtp_port: u16,
}

impl MailSettings {
    pub const DEFAULT_HOST: &'static str = "smtp.gmail.com";
    pub const DEFAULT_PORT: u16 = 465;
}

/// Generative-text service endpoint and credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmSettings {
    pub api_key: Secret,
    pub model: String,
    pub base_url: String,
}

impl LlmSettings {
    pub const DEFAULT_MODEL: &'static str = "gemini-2.0-flash";
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";
}

/// Immutable configuration shared by every component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentorConfig {
    pub webhook_secret: Secret,
    pub mail: MailSettings,
    pub llm: LlmSettings,
    /// Source-hosting account name. Shown in the startup log only.
    pub github_username: Option<String>,
    pub execution_mode: ExecutionMode,
    pub retry: RetryConfig,
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
