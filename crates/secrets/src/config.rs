//! Startup configuration loading.

use std::time::Duration;

use pipeline::config::{LLM_API_KEY, MAIL_PASSWORD, MAIL_USER, WEBHOOK_SECRET};
use pipeline::{
    config::GITHUB_USERNAME_VAR, ExecutionMode, LlmSettings, MailSettings, MentorConfig,
    MentorError, RetryConfig, Secret, SecretSpec,
};
use tracing::info;

use crate::{LocalSource, SecretResolver};

const SMTP_HOST_VAR: &str = "MENTOR_SMTP_HOST";
const SMTP_PORT_VAR: &str = "MENTOR_SMTP_PORT";
const LLM_MODEL_VAR: &str = "MENTOR_LLM_MODEL";
const LLM_BASE_URL_VAR: &str = "MENTOR_LLM_BASE_URL";
const RETRY_ATTEMPTS_VAR: &str = "MENTOR_RETRY_ATTEMPTS";
const RETRY_COOLDOWN_VAR: &str = "MENTOR_RETRY_COOLDOWN_SECS";

/// Builds the process-wide [`MentorConfig`].
///
/// Secrets go through `resolver`; plain settings are read from the
/// resolver's local source only.
///
/// # Errors
///
/// - [`MentorError::MissingSecret`] for the first required secret that
///   resolves to nothing.
/// - [`MentorError::ConfigurationError`] for unparseable plain settings.
pub async fn load_config(resolver: &SecretResolver) -> Result<MentorConfig, MentorError> {
    let local = resolver.local();

    let webhook_secret = require(resolver, &WEBHOOK_SECRET).await?;
    let mail_user = require(resolver, &MAIL_USER).await?;
    let mail_password = require(resolver, &MAIL_PASSWORD).await?;
    let llm_api_key = require(resolver, &LLM_API_KEY).await?;

    let execution_mode = ExecutionMode::detect(
        local.get(ExecutionMode::SERVERLESS_MARKER_VAR).as_deref(),
        local.get(ExecutionMode::OVERRIDE_VAR).as_deref(),
    )?;

    let defaults = RetryConfig::default();
    let retry = RetryConfig {
        max_attempts: parse_or(local, RETRY_ATTEMPTS_VAR, defaults.max_attempts)?,
        cooldown: Duration::from_secs(parse_or(
            local,
            RETRY_COOLDOWN_VAR,
            defaults.cooldown.as_secs(),
        )?),
    };
    if retry.max_attempts == 0 {
        return Err(MentorError::ConfigurationError {
            message: format!("{RETRY_ATTEMPTS_VAR} must be at least 1"),
        });
    }

    let config = MentorConfig {
        webhook_secret: Secret::new(webhook_secret).ok_or_else(|| missing(&WEBHOOK_SECRET))?,
        mail: MailSettings {
            user: mail_user,
            password: Secret::new(mail_password).ok_or_else(|| missing(&MAIL_PASSWORD))?,
            smtp_host: local
                .get(SMTP_HOST_VAR)
                .unwrap_or_else(|| MailSettings::DEFAULT_HOST.to_string()),
            smtp_port: parse_or(local, SMTP_PORT_VAR, MailSettings::DEFAULT_PORT)?,
        },
        llm: LlmSettings {
            api_key: Secret::new(llm_api_key).ok_or_else(|| missing(&LLM_API_KEY))?,
            model: local
                .get(LLM_MODEL_VAR)
                .unwrap_or_else(|| LlmSettings::DEFAULT_MODEL.to_string()),
            base_url: local
                .get(LLM_BASE_URL_VAR)
                .unwrap_or_else(|| LlmSettings::DEFAULT_BASE_URL.to_string()),
        },
        github_username: local.get(GITHUB_USERNAME_VAR),
        execution_mode,
        retry,
    };

    info!(
        execution_mode = ?config.execution_mode,
        mail_user = %config.mail.user,
        smtp_host = %config.mail.smtp_host,
        llm_model = %config.llm.model,
        github_username = config.github_username.as_deref().unwrap_or("-"),
        retry_attempts = config.retry.max_attempts,
        retry_cooldown_secs = config.retry.cooldown.as_secs(),
        "Configuration loaded"
    );

    Ok(config)
}

async fn require(resolver: &SecretResolver, spec: &SecretSpec) -> Result<String, MentorError> {
    resolver.resolve(spec).await.ok_or_else(|| missing(spec))
}

fn missing(spec: &SecretSpec) -> MentorError {
    MentorError::MissingSecret {
        name: spec.name.to_string(),
        remote_path: spec.remote_path.to_string(),
    }
}

fn parse_or<T>(local: &LocalSource, var: &str, default: T) -> Result<T, MentorError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match local.get(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| MentorError::ConfigurationError {
                message: format!("{var}='{raw}' is invalid: {e}"),
            }),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
