//! Prompt construction.
//!
//! The prompt embeds the event fields verbatim and asks for exactly one short
//! task laid out in three ordered sections. The section headings double as
//! the markers the notifier splits on (see [`crate::notification`]).

use crate::{EventType, InboundEvent};

/// Heading of the first section: what to do.
pub const MISSION_SECTION: &str = "### 🎯 The Mission";

/// Heading of the second section: how to do it.
pub const STEPS_SECTION: &str = "### 🛠️ Steps";

/// Heading of the third section: the idea behind it.
pub const CONCEPT_SECTION: &str = "### 📚 Concept to Learn";

const PERSONA: &str = "I am a Fresher DevOps Engineer.";

/// Builds the instruction sent to the generative-text service.
///
/// The first commit message is appended only for `push` events that carry at
/// least one commit.
pub fn build_prompt(event: &InboundEvent, event_type: &EventType) -> String {
    let commit_info = match event.commits().first() {
        Some(commit) if event_type.is_push() => format!(" with message: '{}'", commit.message),
        _ => String::new(),
    };

    format!(
        "{PERSONA} A '{action} {event_type}' event just happened in the repository '{repo}' \
         by user '{sender}'{commit_info}.\n\n\
         Give me ONE small, foundational DevOps task (15-20 mins) related to this activity. \
         Format: {MISSION_SECTION}, {STEPS_SECTION}, {CONCEPT_SECTION}",
        action = event.action(),
        repo = event.repository(),
        sender = event.sender(),
    )
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
