//! FrontendConfig custom resource (`networking.gke.io/v1beta1`)
//!
//! The checker only needs to know that a FrontendConfig exists, so the spec
//! carries no fields and any content, or none, is accepted.

use kube::CustomResource;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

/// Spec object for the `FrontendConfig` CRD
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(from = "Option<IgnoredAny>")]
#[kube(
    group = "networking.gke.io",
    version = "v1beta1",
    kind = "FrontendConfig",
    namespaced,
    schema = "disabled"
)]
pub struct FrontendConfigSpec {}

impl From<Option<IgnoredAny>> for FrontendConfigSpec {
    fn from(_: Option<IgnoredAny>) -> Self {
        Self {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_frontend_config_spec_content_is_ignored() {
        let obj = json!({
            "apiVersion": "networking.gke.io/v1beta1",
            "kind": "FrontendConfig",
            "metadata": { "name": "fe", "namespace": "default" },
            "spec": { "redirectToHttps": { "responseCodeName": "FOUND" } }
        });

        let fc: FrontendConfig = serde_json::from_value(obj).unwrap();
        assert_eq!(fc.metadata.name.as_deref(), Some("fe"));
    }

    #[test]
    fn test_frontend_config_without_spec() {
        let obj = json!({
            "apiVersion": "networking.gke.io/v1beta1",
            "kind": "FrontendConfig",
            "metadata": { "name": "fe", "namespace": "default" }
        });

        assert!(serde_json::from_value::<FrontendConfig>(obj).is_ok());
    }
}
