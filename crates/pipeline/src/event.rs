//! The inbound event payload.
//!
//! Only the handful of fields the prompt needs are modelled; everything else
//! in the webhook body is ignored. Missing or wrongly typed fields never fail
//! deserialisation: each falls back on its own to the default documented on
//! its accessor, leaving the other fields intact.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Repository name used when the payload carries none.
pub const UNKNOWN_REPOSITORY: &str = "Unknown Repo";

/// Sender login used when the payload carries none.
pub const UNKNOWN_SENDER: &str = "Someone";

/// A source-control activity as described by the webhook body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InboundEvent {
    #[serde(default, deserialize_with = "lenient")]
    action: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    repository: Option<Repository>,
    #[serde(default, deserialize_with = "lenient")]
    sender: Option<Sender>,
    /// Present on `push` deliveries only.
    #[serde(default, deserialize_with = "lenient")]
    commits: Option<Vec<Commit>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
struct Repository {
    #[serde(default, deserialize_with = "lenient")]
    full_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
struct Sender {
    #[serde(default, deserialize_with = "lenient")]
    login: Option<String>,
}

/// One commit record from a `push` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Commit {
    /// Full commit message.
    #[serde(default, deserialize_with = "lenient")]
    pub message: String,
}

impl InboundEvent {
    /// Parses a raw webhook body.
    ///
    /// Bodies that are not a JSON object (or are not JSON at all) yield an
    /// empty event so that every default applies.
    pub fn from_slice(body: &[u8]) -> Self {
        match serde_json::from_slice::<InboundEvent>(body) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "Webhook body is not an event object; using defaults");
                Self::default()
            }
        }
    }

    /// The activity verb (`"opened"`, `"closed"`, ...), empty when absent.
    pub fn action(&self) -> &str {
        self.action.as_deref().unwrap_or("")
    }

    /// `owner/name` of the repository, or [`UNKNOWN_REPOSITORY`].
    pub fn repository(&self) -> &str {
        self.repository
            .as_ref()
            .and_then(|r| r.full_name.as_deref())
            .unwrap_or(UNKNOWN_REPOSITORY)
    }

    /// Login of the user who triggered the event, or [`UNKNOWN_SENDER`].
    pub fn sender(&self) -> &str {
        self.sender
            .as_ref()
            .and_then(|s| s.login.as_deref())
            .unwrap_or(UNKNOWN_SENDER)
    }

    /// Commit records in payload order. Empty for non-push payloads.
    pub fn commits(&self) -> &[Commit] {
        self.commits.as_deref().unwrap_or(&[])
    }
}

/// Reads any JSON value for a field, keeping `T::default()` when it does not
/// have the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
