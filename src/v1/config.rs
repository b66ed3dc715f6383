use std::env;
use std::str::FromStr;

use strum_macros::EnumString;
use thiserror::Error;

pub const DEFAULT_REGION: &str = "us-east-1";

/// When the process builds its inference client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, strum_macros::Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum InferenceClientMode {
    /// Built during start-up, before the first invocation.
    Eager,
    /// Built the first time something asks for it.
    #[default]
    Lazy,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    pub region: String,
    pub inference_client: InferenceClientMode,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        HandlerConfig {
            region: DEFAULT_REGION.to_string(),
            inference_client: InferenceClientMode::default(),
        }
    }
}

impl HandlerConfig {
    /// Loads `.env` when present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let region = non_empty("INFERENCE_REGION")
            .or_else(|| non_empty("AWS_REGION"))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        let inference_client = match non_empty("INFERENCE_CLIENT") {
            Some(value) => InferenceClientMode::from_str(value.trim())
                .map_err(|_| ConfigError::InvalidValue("INFERENCE_CLIENT".to_string(), value))?,
            None => InferenceClientMode::default(),
        };
        Ok(HandlerConfig {
            region: region.trim().to_string(),
            inference_client,
        })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    InvalidValue(String, String),
}
