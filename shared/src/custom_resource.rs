//! Custom resource event dispatch.
//!
//! Delete requests return immediately with the resource identifier. Create
//! and Update requests read the environment label from the parameter store and
//! return the derived chart values as the response `Data`.

use tracing::{debug, error, info, info_span, Instrument};

use crate::models::{CustomResourceEvent, CustomResourceResponse, RequestType};
use crate::parameters::{get_environment_value, ParameterStore};
use crate::replicas::generate_helm_values;
use crate::Result;

/// Handle one custom resource event.
///
/// `fallback_id` identifies the resource when the event carries no
/// `PhysicalResourceId` (the first Create). `default_parameter` is read when
/// the resource properties do not name a parameter.
pub async fn handle_event(
    event: CustomResourceEvent,
    fallback_id: &str,
    default_parameter: &str,
    store: &dyn ParameterStore,
) -> Result<CustomResourceResponse> {
    let span = info_span!(
        "custom_resource",
        request_id = event.request_id.as_deref().unwrap_or(""),
        request_type = %event.request_type,
        logical_resource_id = event.logical_resource_id.as_deref().unwrap_or(""),
    );

    dispatch(event, fallback_id, default_parameter, store)
        .instrument(span)
        .await
}

async fn dispatch(
    event: CustomResourceEvent,
    fallback_id: &str,
    default_parameter: &str,
    store: &dyn ParameterStore,
) -> Result<CustomResourceResponse> {
    let previous_trigger = event
        .old_resource_properties
        .as_ref()
        .and_then(|props| props.ssm_value_trigger.as_deref());
    info!(
        stack_id = event.stack_id.as_deref().unwrap_or(""),
        resource_type = event.resource_type.as_deref().unwrap_or(""),
        service_token = event.service_token.as_deref().unwrap_or(""),
        previous_trigger = previous_trigger.unwrap_or(""),
        "Received custom resource event"
    );

    let request_type: RequestType = event.request_type.parse().map_err(|e| {
        error!(error = %e, "Rejecting custom resource event");
        e
    })?;

    let physical_resource_id = event
        .physical_resource_id
        .clone()
        .unwrap_or_else(|| fallback_id.to_string());

    match request_type {
        RequestType::Delete => {
            info!("Handling DELETE request, no cleanup needed");
            Ok(CustomResourceResponse {
                physical_resource_id,
                data: None,
            })
        }
        RequestType::Create | RequestType::Update => {
            match resolve_values(&event, default_parameter, store).await {
                Ok(values) => {
                    info!(replica_count = %values.replica_count, "Returning successful response");
                    Ok(CustomResourceResponse {
                        physical_resource_id,
                        data: Some(values),
                    })
                }
                Err(e) => {
                    error!(
                        request_type = %request_type,
                        error = %e,
                        "EXECUTION FAILED: request failed during processing"
                    );
                    Err(e)
                }
            }
        }
    }
}

async fn resolve_values(
    event: &CustomResourceEvent,
    default_parameter: &str,
    store: &dyn ParameterStore,
) -> Result<crate::models::HelmValues> {
    let properties = event.resource_properties.clone().unwrap_or_default();
    if let Some(trigger) = properties.ssm_value_trigger.as_deref() {
        debug!(trigger, "Update triggered by parameter value");
    }

    let parameter_name = properties
        .ssm_parameter_name
        .as_deref()
        .unwrap_or(default_parameter);

    let environment = get_environment_value(store, parameter_name).await?;
    let values = generate_helm_values(Some(&environment));
    debug!(values = %values.ingress_controller_values(), "Chart values for ingress controller");
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::testing::{DeniedStore, MemoryStore};
    use crate::{Config, Error};
    use serde_json::json;

    const DEFAULT: &str = "/platform/account/env";
    const LOG_STREAM: &str = "2026/10/19/[$LATEST]0123456789abcdef";

    fn event(value: serde_json::Value) -> CustomResourceEvent {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_delete_passes_through_id() {
        let store = MemoryStore::default();
        let response = handle_event(
            event(json!({"RequestType": "Delete", "PhysicalResourceId": "abc-123"})),
            LOG_STREAM,
            DEFAULT,
            &store,
        )
        .await
        .unwrap();

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"PhysicalResourceId": "abc-123"})
        );
        assert_eq!(store.reads(), 0);
    }

    #[tokio::test]
    async fn test_delete_without_id_uses_fallback() {
        let response = handle_event(
            event(json!({"RequestType": "Delete"})),
            LOG_STREAM,
            DEFAULT,
            &DeniedStore,
        )
        .await
        .unwrap();

        assert_eq!(response.physical_resource_id, LOG_STREAM);
        assert!(response.data.is_none());
    }

    fn blank_parameter_config() -> Config {
        Config::from_lookup(|key| (key == "SSM_PARAMETER_NAME").then(String::new))
    }

    #[tokio::test]
    async fn test_delete_succeeds_with_blank_parameter_setting() {
        let config = blank_parameter_config();
        let response = handle_event(
            event(json!({"RequestType": "Delete", "PhysicalResourceId": "abc-123"})),
            LOG_STREAM,
            &config.parameter_name,
            &DeniedStore,
        )
        .await
        .unwrap();

        assert_eq!(response.physical_resource_id, "abc-123");
        assert!(response.data.is_none());
    }

    #[tokio::test]
    async fn test_create_with_blank_parameter_setting_reads_default() {
        let config = blank_parameter_config();
        let store = MemoryStore::with(DEFAULT, "prod");
        let response = handle_event(
            event(json!({"RequestType": "Create"})),
            LOG_STREAM,
            &config.parameter_name,
            &store,
        )
        .await
        .unwrap();

        assert_eq!(response.data.unwrap().replica_count, "2");
    }

    #[tokio::test]
    async fn test_create_development() {
        let store = MemoryStore::with(DEFAULT, "development");
        let response = handle_event(
            event(json!({"RequestType": "Create"})),
            LOG_STREAM,
            DEFAULT,
            &store,
        )
        .await
        .unwrap();

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"PhysicalResourceId": LOG_STREAM, "Data": {"ReplicaCount": "1"}})
        );
    }

    #[tokio::test]
    async fn test_update_reads_named_parameter() {
        let store = MemoryStore::with("/team/env", "STAGE");
        let response = handle_event(
            event(json!({
                "RequestType": "Update",
                "PhysicalResourceId": "abc-123",
                "ResourceProperties": {"SsmParameterName": "/team/env", "SSMValueTrigger": "STAGE"}
            })),
            LOG_STREAM,
            DEFAULT,
            &store,
        )
        .await
        .unwrap();

        assert_eq!(response.physical_resource_id, "abc-123");
        // Stored value is lower-cased before resolution.
        assert_eq!(response.data.unwrap().replica_count, "2");
    }

    #[tokio::test]
    async fn test_missing_parameter_fails() {
        let store = MemoryStore::default();
        let err = handle_event(
            event(json!({"RequestType": "Create"})),
            LOG_STREAM,
            DEFAULT,
            &store,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::ParameterNotFound(ref name) if name == DEFAULT));
    }

    #[tokio::test]
    async fn test_denied_lookup_fails_update() {
        let err = handle_event(
            event(json!({"RequestType": "Update", "PhysicalResourceId": "abc-123"})),
            LOG_STREAM,
            DEFAULT,
            &DeniedStore,
        )
        .await
        .unwrap_err();

        assert!(err.is_configuration_lookup());
    }

    #[tokio::test]
    async fn test_unknown_request_type_fails() {
        let store = MemoryStore::with(DEFAULT, "prod");
        let err = handle_event(
            event(json!({"RequestType": "Rollback"})),
            LOG_STREAM,
            DEFAULT,
            &store,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::UnsupportedRequestType(ref kind) if kind == "Rollback"));
        assert_eq!(store.reads(), 0);
    }
}
