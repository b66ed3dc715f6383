use lambda_runtime::{service_fn, Error};
use message_lambda::v1::{
    aws::{lambda::function_handler, shared_provider},
    config::{HandlerConfig, InferenceClientMode},
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::tracing::init_default_subscriber();

    let config = HandlerConfig::from_env()?;
    info!(
        region = %config.region,
        inference_client = %config.inference_client,
        "Starting message handler"
    );
    if config.inference_client == InferenceClientMode::Eager {
        shared_provider(&config).await?;
    }

    lambda_runtime::run(service_fn(function_handler)).await
}
