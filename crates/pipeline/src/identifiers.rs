//! Newtype domain identifiers.
//!
//! Every value that names something on the wire is a distinct newtype so that
//! an event type is never confused with a delivery id even though both are
//! strings under the hood.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id! {
    /// Name of the activity that triggered a webhook (e.g. `"push"`, `"issues"`).
    ///
    /// Arrives out-of-band in the `X-GitHub-Event` header, never in the body.
    EventType
}

impl EventType {
    /// Event type used when the sender omitted the header.
    pub const FALLBACK: &'static str = "event";

    /// Builds an event type from an optional header value, falling back to
    /// [`EventType::FALLBACK`] when the header is absent or empty.
    pub fn from_header(value: Option<&str>) -> Self {
        value
            .and_then(Self::new)
            .unwrap_or_else(|| Self(Self::FALLBACK.to_string()))
    }

    /// Returns `true` for the `push` event, the only type whose commits are
    /// consulted.
    pub fn is_push(&self) -> bool {
        self.0 == "push"
    }

    /// First character upper-cased, the rest lower-cased (`"PUSH"` -> `"Push"`).
    pub fn capitalized(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
            None => String::new(),
        }
    }
}

string_id! {
    /// Sender-assigned identifier of one webhook delivery (`X-GitHub-Delivery`).
    DeliveryId
}

// ---------------------------------------------------------------------------
// Identifiers — UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies one unit of pipeline work (generate + notify).
///
/// Generated fresh for every accepted delivery; propagated through spans so
/// detached background work can be correlated with the request that spawned it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(Uuid);

impl JobId {
    /// Generates a new random job identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[path = "identifiers_tests.rs"]
mod tests;
