//! AWS Systems Manager Parameter Store integration.

use async_trait::async_trait;
use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::operation::get_parameter::{GetParameterError, GetParameterOutput};
use aws_sdk_ssm::Client as SsmClient;
use tracing::{error, info};

use crate::{Error, Result};

/// Reads named string values from a key-value configuration store.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Fetch the raw value stored under `name`, decrypting it if needed.
    async fn fetch(&self, name: &str) -> Result<String>;
}

/// [`ParameterStore`] backed by SSM Parameter Store.
#[derive(Debug, Clone)]
pub struct SsmParameterStore {
    client: SsmClient,
}

impl SsmParameterStore {
    pub fn new(client: SsmClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ParameterStore for SsmParameterStore {
    async fn fetch(&self, name: &str) -> Result<String> {
        let response = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(true)
            .send()
            .await
            .map_err(|e| {
                lookup_error(name, e.as_service_error(), DisplayErrorContext(&e).to_string())
            })?;

        parameter_value(name, &response)
    }
}

/// Classify a failed `GetParameter` call.
fn lookup_error(name: &str, service_error: Option<&GetParameterError>, reason: String) -> Error {
    match service_error {
        Some(se) if se.is_parameter_not_found() => Error::ParameterNotFound(name.to_string()),
        _ => Error::ConfigurationLookup {
            name: name.to_string(),
            reason,
        },
    }
}

/// Extract the string value from a `GetParameter` response.
fn parameter_value(name: &str, response: &GetParameterOutput) -> Result<String> {
    response
        .parameter()
        .and_then(|p| p.value())
        .map(str::to_string)
        .ok_or_else(|| Error::ConfigurationLookup {
            name: name.to_string(),
            reason: "parameter has no value".to_string(),
        })
}

/// Read the environment label stored under `name`, normalized to lower case.
///
/// Every call goes to the store; nothing is cached. Lookup failures are
/// logged with the parameter name and returned unchanged.
pub async fn get_environment_value(store: &dyn ParameterStore, name: &str) -> Result<String> {
    if name.trim().is_empty() {
        return Err(Error::Validation("parameter name must not be empty".to_string()));
    }

    match store.fetch(name).await {
        Ok(raw) => {
            let environment = raw.to_lowercase();
            info!(parameter_name = name, environment = %environment, "Retrieved parameter value");
            Ok(environment)
        }
        Err(e) => {
            error!(parameter_name = name, error = %e, "Error reading parameter");
            Err(e)
        }
    }
}
