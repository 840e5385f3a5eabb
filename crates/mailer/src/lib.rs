//! Hook Mentor mail notifier.
//!
//! Implements [`pipeline::Notifier`] by sending one plain-text message from
//! the operator's mailbox to the same mailbox through an authenticated SMTP
//! relay over implicit TLS.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Message building, relay connection, and credential
//! handling live here. A new relay connection is opened per notification and
//! closed after the single message is sent.
//!
//! ## Failure semantics
//!
//! [`SmtpNotifier::notify`] never fails: every [`NotifyError`] is logged and
//! swallowed so a broken relay cannot turn an accepted webhook into a 5xx.
//! [`SmtpNotifier::try_send`] exposes the error for callers that need it.

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use pipeline::{MailSettings, Notification, Notifier};
use thiserror::Error;
use tracing::{error, info, instrument};

/// Failures while building or sending a notification email.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The configured account is not a valid mailbox address.
    #[error("invalid mailbox address '{address}': {detail}")]
    InvalidAddress { address: String, detail: String },

    /// The message could not be assembled.
    #[error("could not build message: {0}")]
    Message(String),

    /// Connecting, authenticating, or sending failed.
    #[error("relay error: {0}")]
    Transport(String),
}

/// [`Notifier`] that mails the operator through an SMTP relay.
#[derive(Debug, Clone)]
pub struct SmtpNotifier {
    settings: MailSettings,
    mailbox: Mailbox,
}

impl SmtpNotifier {
    /// Creates a notifier for `settings.user`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::InvalidAddress`] when the account is not a
    /// parseable mailbox. Checked once at startup rather than per message.
    pub fn new(settings: MailSettings) -> Result<Self, NotifyError> {
        let mailbox = settings
            .user
            .parse::<Mailbox>()
            .map_err(|e| NotifyError::InvalidAddress {
                address: settings.user.clone(),
                detail: e.to_string(),
            })?;

        Ok(Self { settings, mailbox })
    }

    /// Builds the self-addressed plain-text message for `notification`.
    pub fn build_message(&self, notification: &Notification) -> Result<Message, NotifyError> {
        Message::builder()
            .from(self.mailbox.clone())
            .to(self.mailbox.clone())
            .subject(notification.subject())
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body().to_string())
            .map_err(|e| NotifyError::Message(e.to_string()))
    }

    /// Sends `notification`, returning the first failure.
    pub async fn try_send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let message = self.build_message(notification)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.settings.smtp_host)
            .map_err(|e| NotifyError::Transport(e.to_string()))?
            .port(self.settings.smtp_port)
            .credentials(Credentials::new(
                self.settings.user.clone(),
                self.settings.password.expose().to_string(),
            ))
            .build();

        transport
            .send(message)
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    #[instrument(skip_all, fields(subject = notification.subject()))]
    async fn notify(&self, notification: &Notification) {
        match self.try_send(notification).await {
            Ok(()) => info!(relay = %self.settings.smtp_host, "Notification sent"),
            Err(e) => error!(error = %e, "Email delivery failed"),
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
