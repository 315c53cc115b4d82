//! Custom resource event and response models.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Lifecycle request sent by the provider framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

impl FromStr for RequestType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Create" => Ok(RequestType::Create),
            "Update" => Ok(RequestType::Update),
            "Delete" => Ok(RequestType::Delete),
            other => Err(Error::UnsupportedRequestType(other.to_string())),
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestType::Create => "Create",
            RequestType::Update => "Update",
            RequestType::Delete => "Delete",
        };
        f.write_str(name)
    }
}

/// Properties configured on the custom resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceProperties {
    /// Parameter holding the environment label
    #[serde(rename = "SsmParameterName")]
    pub ssm_parameter_name: Option<String>,
    /// Current parameter value, present only to force an Update when it changes
    #[serde(rename = "SSMValueTrigger")]
    pub ssm_value_trigger: Option<String>,
}

/// CloudFormation custom resource event.
///
/// `request_type` stays a string here so that an unknown kind surfaces as
/// [`Error::UnsupportedRequestType`] rather than a generic decode failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceEvent {
    pub request_type: String,
    pub request_id: Option<String>,
    pub stack_id: Option<String>,
    pub logical_resource_id: Option<String>,
    pub resource_type: Option<String>,
    pub service_token: Option<String>,
    pub physical_resource_id: Option<String>,
    #[serde(default)]
    pub resource_properties: Option<ResourceProperties>,
    #[serde(default)]
    pub old_resource_properties: Option<ResourceProperties>,
}

/// Values derived for the chart release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelmValues {
    #[serde(rename = "ReplicaCount")]
    pub replica_count: String,
}

impl HelmValues {
    /// Values document for the `ingress-nginx` chart controller.
    pub fn ingress_controller_values(&self) -> Value {
        json!({
            "controller": {
                "replicaCount": self.replica_count,
                "electionId": "ingress-controller-leader",
            }
        })
    }
}

/// Response handed back to the provider framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomResourceResponse {
    #[serde(rename = "PhysicalResourceId")]
    pub physical_resource_id: String,
    #[serde(rename = "Data", skip_serializing_if = "Option::is_none")]
    pub data: Option<HelmValues>,
}
