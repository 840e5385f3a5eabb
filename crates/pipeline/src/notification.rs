//! Outbound notification values.

use crate::EventType;

/// Body delivered when the generated task is empty.
pub const EMPTY_BODY: &str = "No content";

/// Marker that starts each top-level section of a generated task.
pub const SECTION_MARKER: &str = "###";

/// Divider inserted before every [`SECTION_MARKER`].
pub const SECTION_DIVIDER: &str = "\n---\n";

/// One self-addressed email: subject plus normalised plain-text body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    subject: String,
    body: String,
}

impl Notification {
    /// Builds a notification, normalising `body` with [`normalize_body`].
    pub fn new(subject: impl Into<String>, body: &str) -> Self {
        Self {
            subject: subject.into(),
            body: normalize_body(body),
        }
    }

    /// Builds the notification for a generated task about `repository`.
    pub fn for_task(event_type: &EventType, repository: &str, task: &str) -> Self {
        Self::new(subject_for(event_type, repository), task)
    }

    /// The subject line.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The normalised plain-text body.
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// `"🔔 DevOps Activity: Push on acme/widgets"`.
pub fn subject_for(event_type: &EventType, repository: &str) -> String {
    format!(
        "🔔 DevOps Activity: {} on {}",
        event_type.capitalized(),
        repository
    )
}

/// Substitutes [`EMPTY_BODY`] for an empty body, then places a
/// [`SECTION_DIVIDER`] in front of every [`SECTION_MARKER`] so sections render
/// as separate blocks in plain-text mail clients.
pub fn normalize_body(body: &str) -> String {
    let body = if body.is_empty() { EMPTY_BODY } else { body };
    body.replace(
        SECTION_MARKER,
        &format!("{SECTION_DIVIDER}{SECTION_MARKER}"),
    )
}

#[cfg(test)]
#[path = "notification_tests.rs"]
mod tests;
