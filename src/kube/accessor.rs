//! `ClusterAccessor` backed by the Kubernetes API

use async_trait::async_trait;
use kube::api::ListParams;
use kube::{Api, Client, Resource};
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use super::{ClientOptions, create_client};
use crate::check::{AccessError, CheckError, ClusterAccessor};
use crate::models::{BackendConfig, FrontendConfig, Ingress, ResourceKind, Service};

/// Read-only accessor sharing one client across every API group
#[derive(Clone)]
pub struct KubeAccessor {
    client: Client,
}

impl KubeAccessor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build the client; any failure here aborts the run
    pub async fn connect(options: &ClientOptions) -> Result<Self, CheckError> {
        let client = create_client(options)
            .await
            .map_err(|e| CheckError::Connection(format!("{:#}", e)))?;
        Ok(Self::new(client))
    }

    async fn get<K>(&self, kind: ResourceKind, namespace: &str, name: &str) -> Result<K, AccessError>
    where
        K: Resource<Scope = k8s_openapi::NamespaceResourceScope>
            + Clone
            + DeserializeOwned
            + Debug,
        K::DynamicType: Default,
    {
        let api: Api<K> = Api::namespaced(self.client.clone(), namespace);
        match api.get(name).await {
            Ok(obj) => Ok(obj),
            Err(kube::Error::Api(e)) if e.code == 404 => {
                Err(AccessError::not_found(kind, namespace, name))
            }
            Err(e) => Err(AccessError::Api(e)),
        }
    }
}

#[async_trait]
impl ClusterAccessor for KubeAccessor {
    async fn list_ingresses(&self, namespace: Option<String>) -> Result<Vec<Ingress>, AccessError> {
        let api: Api<Ingress> = match namespace.as_deref() {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        };
        let list = api.list(&ListParams::default()).await?;
        Ok(list.items)
    }

    async fn get_service(&self, namespace: &str, name: &str) -> Result<Service, AccessError> {
        self.get(ResourceKind::Service, namespace, name).await
    }

    async fn get_backend_config(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<BackendConfig, AccessError> {
        self.get(ResourceKind::BackendConfig, namespace, name).await
    }

    async fn get_frontend_config(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<FrontendConfig, AccessError> {
        self.get(ResourceKind::FrontendConfig, namespace, name).await
    }
}
