//! AWS Systems Manager Parameter Store.

use async_trait::async_trait;
use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::Client;
use pipeline::{ParameterStore, SecretError};
use tokio::sync::OnceCell;
use tracing::info;

/// [`ParameterStore`] backed by SSM `GetParameter` with decryption.
///
/// The SDK client is built lazily on the first lookup, so a process whose
/// secrets all come from the environment never loads AWS configuration.
#[derive(Debug)]
pub struct SsmParameterStore {
    region: String,
    client: OnceCell<Client>,
}

impl SsmParameterStore {
    pub const DEFAULT_REGION: &'static str = "us-east-1";

    /// Region override for the parameter store.
    pub const REGION_VAR: &'static str = "MENTOR_SSM_REGION";

    /// Creates a store for `region`; no AWS call is made until the first lookup.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> &Client {
        self.client
            .get_or_init(|| async {
                let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                    .region(aws_config::Region::new(self.region.clone()))
                    .load()
                    .await;
                info!(region = %self.region, "AWS SSM parameter store client initialized");
                Client::new(&sdk_config)
            })
            .await
    }
}

#[async_trait]
impl ParameterStore for SsmParameterStore {
    async fn get_parameter(&self, path: &str) -> Result<String, SecretError> {
        let output = self
            .client()
            .await
            .get_parameter()
            .name(path)
            .with_decryption(true)
            .send()
            .await
            .map_err(|e| SecretError::Unavailable {
                path: path.to_string(),
                detail: format!("{} (region: {})", DisplayErrorContext(&e), self.region),
            })?;

        output
            .parameter()
            .and_then(|p| p.value())
            .map(str::to_owned)
            .ok_or_else(|| SecretError::NotFound {
                path: path.to_string(),
            })
    }
}
