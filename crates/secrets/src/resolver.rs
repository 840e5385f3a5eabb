//! Local-then-remote secret lookup.

use std::collections::HashMap;
use std::sync::Arc;

use pipeline::{ParameterStore, SecretSpec};
use tracing::{debug, error};

/// Where local overrides come from.
#[derive(Debug, Clone)]
pub enum LocalSource {
    /// `std::env::var(name)`.
    Environment,
    /// A fixed name/value map.
    Map(HashMap<String, String>),
}

impl LocalSource {
    /// Returns the non-empty local value for `name`, if any.
    pub fn get(&self, name: &str) -> Option<String> {
        let value = match self {
            LocalSource::Environment => std::env::var(name).ok(),
            LocalSource::Map(map) => map.get(name).cloned(),
        };
        value.filter(|v| !v.is_empty())
    }
}

/// Resolves [`SecretSpec`]s against a [`LocalSource`] and a remote
/// [`ParameterStore`].
#[derive(Clone)]
pub struct SecretResolver {
    local: LocalSource,
    remote: Arc<dyn ParameterStore>,
}

impl SecretResolver {
    /// Creates a resolver that consults `local` before `remote`.
    pub fn new(local: LocalSource, remote: Arc<dyn ParameterStore>) -> Self {
        Self { local, remote }
    }

    /// The local source, also used for plain (non-secret) settings.
    pub fn local(&self) -> &LocalSource {
        &self.local
    }

    /// Returns the value for `spec`, or `None` when neither source has it.
    ///
    /// Not retried. The remote store is only contacted on a local miss.
    pub async fn resolve(&self, spec: &SecretSpec) -> Option<String> {
        if let Some(value) = self.local.get(spec.name) {
            debug!(secret_name = spec.name, "Secret resolved from local override");
            return Some(value);
        }

        match self.remote.get_parameter(spec.remote_path).await {
            Ok(value) if !value.is_empty() => {
                debug!(
                    secret_name = spec.name,
                    remote_path = spec.remote_path,
                    "Secret resolved from parameter store"
                );
                Some(value)
            }
            Ok(_) => {
                error!(
                    secret_name = spec.name,
                    remote_path = spec.remote_path,
                    "Parameter store returned an empty value"
                );
                None
            }
            Err(e) => {
                error!(
                    secret_name = spec.name,
                    remote_path = spec.remote_path,
                    error = %e,
                    "Error fetching secret"
                );
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
