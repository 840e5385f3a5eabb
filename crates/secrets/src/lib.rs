//! Hook Mentor secret resolution and configuration loading.
//!
//! ## Resolution order
//!
//! 1. A local override (the process environment, or a fixed map in tests).
//!    A present, non-empty value is returned without touching the network.
//! 2. The remote [`pipeline::ParameterStore`] (AWS SSM Parameter Store in
//!    production), queried by the secret's remote path with decryption.
//!
//! A remote failure is logged and surfaced as `None`; [`load_config`] turns
//! any missing required secret into a startup error.

pub mod config;
pub mod resolver;
pub mod ssm;

pub use config::load_config;
pub use resolver::{LocalSource, SecretResolver};
pub use ssm::SsmParameterStore;
