//! Read-only cluster access used by the checks
//!
//! The pipeline only needs four lookups. They are grouped into one capability
//! trait so the pipeline does not care how many API clients sit behind it,
//! and so tests can drive it with an in-memory snapshot.

use async_trait::async_trait;

use crate::models::{BackendConfig, FrontendConfig, Ingress, ResourceKind, Service};

/// Failure of a single lookup
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("{kind} {namespace}/{name} not found")]
    NotFound {
        kind: ResourceKind,
        namespace: String,
        name: String,
    },

    #[error("Kubernetes API error: {0}")]
    Api(#[from] kube::Error),
}

impl AccessError {
    pub fn not_found(kind: ResourceKind, namespace: &str, name: &str) -> Self {
        AccessError::NotFound {
            kind,
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }
}

/// Read-only view of the cluster
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClusterAccessor: Send + Sync {
    /// List Ingresses in a namespace, or in all namespaces when `None`
    async fn list_ingresses(&self, namespace: Option<String>) -> Result<Vec<Ingress>, AccessError>;

    async fn get_service(&self, namespace: &str, name: &str) -> Result<Service, AccessError>;

    async fn get_backend_config(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<BackendConfig, AccessError>;

    async fn get_frontend_config(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<FrontendConfig, AccessError>;
}
