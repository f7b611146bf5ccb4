//! BackendConfig custom resource (`cloud.google.com/v1`)
//!
//! Only the fields the checker reads are modelled; unknown fields are ignored
//! on deserialization so newer BackendConfig versions still parse.

use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// GCE default for both `checkIntervalSec` and `timeoutSec`
pub const DEFAULT_HEALTH_CHECK_SECONDS: i64 = 5;

/// Spec object for the `BackendConfig` CRD
///
/// A missing or null `spec` reads as an empty one.
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", from = "Option<BackendConfigFields>")]
#[kube(
    group = "cloud.google.com",
    version = "v1",
    kind = "BackendConfig",
    namespaced,
    schema = "disabled"
)]
pub struct BackendConfigSpec {
    /// Custom load balancer health check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthCheckConfig>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackendConfigFields {
    #[serde(default)]
    health_check: Option<HealthCheckConfig>,
}

impl From<Option<BackendConfigFields>> for BackendConfigSpec {
    fn from(fields: Option<BackendConfigFields>) -> Self {
        Self {
            health_check: fields.and_then(|f| f.health_check),
        }
    }
}

/// Health check section of a BackendConfig
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_interval_sec: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_sec: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthy_threshold: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unhealthy_threshold: Option<i64>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_path: Option<String>,
}

impl HealthCheckConfig {
    /// Probe interval, falling back to the GCE default when unset
    pub fn effective_check_interval(&self) -> i64 {
        self.check_interval_sec.unwrap_or(DEFAULT_HEALTH_CHECK_SECONDS)
    }

    /// Probe timeout, falling back to the GCE default when unset
    pub fn effective_timeout(&self) -> i64 {
        self.timeout_sec.unwrap_or(DEFAULT_HEALTH_CHECK_SECONDS)
    }
}
