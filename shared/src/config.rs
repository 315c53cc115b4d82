//! Configuration management for the custom resource Lambda.

use std::env;
use tracing::warn;

/// Parameter read when the event does not name one.
pub const DEFAULT_PARAMETER_NAME: &str = "/platform/account/env";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Parameter store key holding the environment label
    pub parameter_name: String,
    /// AWS region
    pub aws_region: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A blank `SSM_PARAMETER_NAME` counts as unset, so a misconfigured
    /// function still starts and can answer Delete requests.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parameter_name = match lookup("SSM_PARAMETER_NAME") {
            Some(name) if !name.trim().is_empty() => name,
            Some(_) => {
                warn!(
                    default_parameter = DEFAULT_PARAMETER_NAME,
                    "SSM_PARAMETER_NAME is empty, using default"
                );
                DEFAULT_PARAMETER_NAME.to_string()
            }
            None => DEFAULT_PARAMETER_NAME.to_string(),
        };

        Self {
            parameter_name,
            aws_region: lookup("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
        }
    }
}
