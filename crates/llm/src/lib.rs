//! Hook Mentor LLM provider infrastructure adapter.
//!
//! Implements the [`pipeline::LlmProvider`] trait for Google's Gemini
//! `generateContent` REST API. Additional providers are added as new modules
//! in this crate without any changes to the `pipeline` crate.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, request formatting, response parsing,
//! and mapping of HTTP 429 to [`pipeline::LlmError::RateLimited`] live here.
//! The retry loop itself lives in the `nodes` gateway; this crate makes
//! exactly one request per call.

pub mod gemini;
mod wire;

pub use gemini::GeminiProvider;
