//! Shared library for the Helm values custom resource Lambda.
//!
//! This crate provides the parameter store accessor, replica resolution and
//! custom resource dispatch used by the Lambda binary.

pub mod config;
pub mod custom_resource;
pub mod error;
pub mod models;
pub mod parameters;
pub mod replicas;

pub use config::{Config, DEFAULT_PARAMETER_NAME};
pub use custom_resource::handle_event;
pub use error::{Error, Result};
pub use models::{CustomResourceEvent, CustomResourceResponse, HelmValues, RequestType, ResourceProperties};
pub use parameters::{get_environment_value, ParameterStore, SsmParameterStore};
pub use replicas::{generate_helm_values, DEFAULT_REPLICAS, REPLICA_MAP};
