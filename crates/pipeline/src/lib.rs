//! Core domain for Hook Mentor.
//!
//! This crate contains every domain concept used to turn a source-control
//! webhook into a short learning task: the inbound event model, prompt
//! construction, notification formatting, process configuration, and the
//! error types shared across crates. Infrastructure crates implement the
//! traits defined in [`ports`]; they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`EventType`, `DeliveryId`, `JobId`) |
//! | [`event`] | The inbound webhook payload and its defaults |
//! | [`prompt`] | Prompt text and section headings |
//! | [`notification`] | Subject and body formatting |
//! | [`types`] | Completion request, safety settings, redacted secrets |
//! | [`config`] | `MentorConfig`, execution mode, retry policy |
//! | [`errors`] | Error and retry-policy types |
//! | [`ports`] | `LlmProvider`, `Notifier`, `ParameterStore` |

pub mod config;
pub mod errors;
pub mod event;
pub mod identifiers;
pub mod notification;
pub mod ports;
pub mod prompt;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use config::{
    ExecutionMode, LlmSettings, MailSettings, MentorConfig, RetryConfig, SecretSpec,
};
pub use errors::{LlmError, MentorError, RetryPolicy, SecretError};
pub use event::{Commit, InboundEvent};
pub use identifiers::{DeliveryId, EventType, JobId};
pub use notification::Notification;
pub use ports::{LlmProvider, Notifier, ParameterStore};
pub use prompt::build_prompt;
pub use types::{
    BlockThreshold, CompletionRequest, HarmCategory, SafetySetting, Secret, Temperature,
};
