//! Hook Mentor orchestration layer.
//!
//! Sequences one accepted webhook delivery through the pipeline:
//! prompt → [`TaskGenerator`] (LLM gateway with bounded rate-limit retry) →
//! [`pipeline::Notification`] → [`pipeline::Notifier`].
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** This crate sequences calls between business logic
//! in the [`pipeline`] crate and infrastructure traits (LLM provider,
//! notifier). It contains no domain rules of its own.
//!
//! ## Execution modes
//!
//! [`EventDispatcher`] hands each job to a [`CompletionStrategy`]:
//!
//! | Strategy | Returns to HTTP layer | Used when |
//! |----------|----------------------|-----------|
//! | [`RunSync`] | after generate + notify finish | host freezes work after the response |
//! | [`RunDetached`] | immediately | long-running server |

pub mod dispatcher;
pub mod gateway;
pub mod strategy;

#[cfg(test)]
pub(crate) mod test_support;

pub use dispatcher::EventDispatcher;
pub use gateway::TaskGenerator;
pub use strategy::{strategy_for, Acknowledgement, CompletionStrategy, Job, RunDetached, RunSync};
