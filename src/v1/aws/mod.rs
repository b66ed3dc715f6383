pub mod lambda;

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use lazy_static::lazy_static;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

use super::config::{HandlerConfig, InferenceClientMode};

/// Bedrock runtime client plus the SDK config it was built from.
///
/// The handler never calls the model; the client exists so a process can
/// pay the configuration cost once and share the handle across invocations.
#[derive(Debug, Clone)]
pub struct InferenceProvider {
    config: SdkConfig,
    client: aws_sdk_bedrockruntime::Client,
}

lazy_static! {
    static ref SHARED_PROVIDER: OnceCell<Arc<InferenceProvider>> = OnceCell::new();
}

impl InferenceProvider {
    pub async fn new(config: &HandlerConfig) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;
        Self {
            client: aws_sdk_bedrockruntime::Client::new(&sdk_config),
            config: sdk_config,
        }
    }
    pub fn client(&self) -> &aws_sdk_bedrockruntime::Client {
        &self.client
    }
    pub fn region(&self) -> Result<String, InferenceError> {
        let region = self
            .config
            .region()
            .ok_or(InferenceError::RegionNotFound)?;
        Ok(region.to_string())
    }
    fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

/// Returns the process-wide provider, building it on first use.
pub async fn shared_provider(config: &HandlerConfig) -> Result<Arc<InferenceProvider>, InferenceError> {
    if config.inference_client == InferenceClientMode::Disabled {
        return Err(InferenceError::Disabled);
    }
    let provider = SHARED_PROVIDER
        .get_or_init(|| async {
            info!(region = %config.region, "Initializing inference client");
            InferenceProvider::new(config).await.arc()
        })
        .await;
    Ok(provider.clone())
}

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Inference client is disabled by configuration")]
    Disabled,
    #[error("Region not found")]
    RegionNotFound,
}
