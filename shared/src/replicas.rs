//! Replica count resolution from the environment label.

use tracing::{info, warn};

use crate::models::HelmValues;

/// Replicas used for any label missing from [`REPLICA_MAP`].
pub const DEFAULT_REPLICAS: u32 = 1;

/// Exact, case-sensitive environment labels and their replica counts.
///
/// Labels such as `staging` and `production` are intentionally absent and
/// fall back to [`DEFAULT_REPLICAS`].
pub const REPLICA_MAP: &[(&str, u32)] = &[("development", 1), ("stage", 2), ("prod", 2)];

/// Resolve the chart values for an environment label.
///
/// Never fails: unknown, empty or missing labels resolve to the default
/// replica count and are logged as a warning.
pub fn generate_helm_values(environment: Option<&str>) -> HelmValues {
    let known = environment.and_then(|env| {
        REPLICA_MAP
            .iter()
            .find(|(label, _)| *label == env)
            .map(|(_, replicas)| *replicas)
    });

    let replicas = match known {
        Some(replicas) => replicas,
        None => {
            warn!(
                environment = environment.unwrap_or("<none>"),
                default_replicas = DEFAULT_REPLICAS,
                "Unknown environment, defaulting replica_count"
            );
            DEFAULT_REPLICAS
        }
    };

    let values = HelmValues {
        replica_count: replicas.to_string(),
    };
    info!(replica_count = %values.replica_count, "Resolved helm values");
    values
}
