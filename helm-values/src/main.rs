//! Helm Values Lambda - Custom resource handler that derives chart values
//! from the account environment parameter.

use aws_config::{BehaviorVersion, Region};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use shared::{handle_event, Config, CustomResourceEvent, CustomResourceResponse, SsmParameterStore};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application state, built once per cold start.
struct AppState {
    config: Config,
    store: SsmParameterStore,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        let config = Config::from_env();
        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.aws_region.clone()))
            .load()
            .await;
        let store = SsmParameterStore::new(aws_sdk_ssm::Client::new(&aws_config));

        info!(parameter_name = %config.parameter_name, "Helm values handler initialized");
        Ok(Self { config, store })
    }
}

async fn handler(
    state: Arc<AppState>,
    event: LambdaEvent<CustomResourceEvent>,
) -> Result<CustomResourceResponse, Error> {
    let (payload, context) = event.into_parts();
    let response = handle_event(
        payload,
        &context.env_config.log_stream,
        &state.config.parameter_name,
        &state.store,
    )
    .await?;
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new().await?);
    let state_clone = state.clone();

    run(service_fn(move |event| {
        let state = state_clone.clone();
        async move { handler(state, event).await }
    }))
    .await
}
