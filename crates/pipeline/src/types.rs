//! Shared value types passed across the port boundary.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! values with invariants (temperatures are finite and non-negative, secrets
//! never print) and participate in requests to infrastructure adapters.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Completion request
// ---------------------------------------------------------------------------

/// Sampling temperature ("creativity") for a completion request.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Temperature(f32);

impl Temperature {
    /// Temperature used for task generation.
    pub const TASK: Temperature = Temperature(0.7);

    /// Creates a [`Temperature`], returning `None` if `value` is negative,
    /// infinite, or NaN.
    #[must_use]
    pub fn new(value: f32) -> Option<Self> {
        if value.is_finite() && value >= 0.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Returns the raw temperature value.
    pub fn as_f32(self) -> f32 {
        self.0
    }
}

/// Content-moderation category understood by the generative-text service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HarmCategory {
    #[serde(rename = "HARM_CATEGORY_HARASSMENT")]
    Harassment,
    #[serde(rename = "HARM_CATEGORY_HATE_SPEECH")]
    HateSpeech,
    #[serde(rename = "HARM_CATEGORY_SEXUALLY_EXPLICIT")]
    SexuallyExplicit,
    #[serde(rename = "HARM_CATEGORY_DANGEROUS_CONTENT")]
    DangerousContent,
}

impl HarmCategory {
    /// Every category the service lets callers tune.
    pub const ALL: [HarmCategory; 4] = [
        HarmCategory::Harassment,
        HarmCategory::HateSpeech,
        HarmCategory::SexuallyExplicit,
        HarmCategory::DangerousContent,
    ];
}

/// Blocking threshold for one [`HarmCategory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockThreshold {
    BlockNone,
    BlockOnlyHigh,
    BlockMediumAndAbove,
    BlockLowAndAbove,
}

/// One category/threshold pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: BlockThreshold,
}

impl SafetySetting {
    /// [`BlockThreshold::BlockNone`] for every category in [`HarmCategory::ALL`].
    pub fn permissive() -> Vec<SafetySetting> {
        HarmCategory::ALL
            .into_iter()
            .map(|category| SafetySetting {
                category,
                threshold: BlockThreshold::BlockNone,
            })
            .collect()
    }
}

/// Everything an [`crate::LlmProvider`] needs for one completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Natural-language instruction.
    pub prompt: String,
    /// Sampling temperature.
    pub temperature: Temperature,
    /// Moderation thresholds to apply.
    pub safety: Vec<SafetySetting>,
}

impl CompletionRequest {
    /// A task-generation request: [`Temperature::TASK`] with
    /// [`SafetySetting::permissive`] thresholds.
    pub fn for_task(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: Temperature::TASK,
            safety: SafetySetting::permissive(),
        }
    }
}

// ---------------------------------------------------------------------------
// Secrets
// ---------------------------------------------------------------------------

/// A resolved secret value.
///
/// `Debug` and `Display` are redacted so configuration can be logged without
/// leaking credentials. Call [`Secret::expose`] at the point of use.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wraps a secret value, returning `None` if it is empty.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        if v.is_empty() {
            None
        } else {
            Some(Self(v))
        }
    }

    /// Returns the plain secret.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl std::fmt::Display for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("***")
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
