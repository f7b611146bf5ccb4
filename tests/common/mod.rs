//! Shared test fixtures
//!
//! `FakeCluster` is an in-memory snapshot implementing `ClusterAccessor`, so
//! the pipeline can be driven end to end without a Kubernetes API server.
//! Objects are built from `serde_json::json!` manifests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use check_gke_ingress::check::{AccessError, ClusterAccessor};
use check_gke_ingress::models::{BackendConfig, FrontendConfig, Ingress, ResourceKind, Service};
use serde_json::{Value, json};

type Key = (String, String);

fn key(namespace: &str, name: &str) -> Key {
    (namespace.to_string(), name.to_string())
}

/// In-memory cluster snapshot
#[derive(Default)]
pub struct FakeCluster {
    ingresses: BTreeMap<Key, Ingress>,
    services: BTreeMap<Key, Service>,
    backend_configs: BTreeMap<Key, BackendConfig>,
    frontend_configs: BTreeMap<Key, FrontendConfig>,
    fail_listing: bool,
    lookups: AtomicUsize,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ingress(mut self, ingress: Ingress) -> Self {
        let k = key(
            ingress.metadata.namespace.as_deref().unwrap_or_default(),
            ingress.metadata.name.as_deref().unwrap_or_default(),
        );
        self.ingresses.insert(k, ingress);
        self
    }

    pub fn with_service(mut self, service: Service) -> Self {
        let k = key(
            service.metadata.namespace.as_deref().unwrap_or_default(),
            service.metadata.name.as_deref().unwrap_or_default(),
        );
        self.services.insert(k, service);
        self
    }

    pub fn with_backend_config(mut self, backend_config: BackendConfig) -> Self {
        let k = key(
            backend_config.metadata.namespace.as_deref().unwrap_or_default(),
            backend_config.metadata.name.as_deref().unwrap_or_default(),
        );
        self.backend_configs.insert(k, backend_config);
        self
    }

    pub fn with_frontend_config(mut self, frontend_config: FrontendConfig) -> Self {
        let k = key(
            frontend_config.metadata.namespace.as_deref().unwrap_or_default(),
            frontend_config.metadata.name.as_deref().unwrap_or_default(),
        );
        self.frontend_configs.insert(k, frontend_config);
        self
    }

    /// Make `list_ingresses` fail
    pub fn failing_list(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Number of single-object lookups served so far
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn lookup<T: Clone>(
        &self,
        objects: &BTreeMap<Key, T>,
        kind: ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<T, AccessError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        objects
            .get(&key(namespace, name))
            .cloned()
            .ok_or_else(|| AccessError::not_found(kind, namespace, name))
    }
}

#[async_trait]
impl ClusterAccessor for FakeCluster {
    async fn list_ingresses(&self, namespace: Option<String>) -> Result<Vec<Ingress>, AccessError> {
        if self.fail_listing {
            return Err(AccessError::not_found(
                ResourceKind::Ingress,
                namespace.as_deref().unwrap_or_default(),
                "",
            ));
        }
        Ok(self
            .ingresses
            .iter()
            .filter(|((ns, _), _)| namespace.as_deref().is_none_or(|wanted| wanted == ns.as_str()))
            .map(|(_, ingress)| ingress.clone())
            .collect())
    }

    async fn get_service(&self, namespace: &str, name: &str) -> Result<Service, AccessError> {
        self.lookup(&self.services, ResourceKind::Service, namespace, name)
    }

    async fn get_backend_config(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<BackendConfig, AccessError> {
        self.lookup(
            &self.backend_configs,
            ResourceKind::BackendConfig,
            namespace,
            name,
        )
    }

    async fn get_frontend_config(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<FrontendConfig, AccessError> {
        self.lookup(
            &self.frontend_configs,
            ResourceKind::FrontendConfig,
            namespace,
            name,
        )
    }
}

fn metadata(namespace: &str, name: &str, annotations: &[(&str, &str)]) -> Value {
    let annotations: serde_json::Map<String, Value> = annotations
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect();
    json!({
        "name": name,
        "namespace": namespace,
        "annotations": annotations,
    })
}

fn path_to(service: &str) -> Value {
    json!({
        "path": "/",
        "pathType": "Prefix",
        "backend": { "service": { "name": service, "port": { "number": 80 } } }
    })
}

/// Ingress with one rule per entry of `rules`, each routing to the listed services
pub fn ingress(
    namespace: &str,
    name: &str,
    annotations: &[(&str, &str)],
    default_backend: Option<&str>,
    rules: &[&[&str]],
) -> Ingress {
    let rules: Vec<Value> = rules
        .iter()
        .map(|services| {
            json!({
                "host": "example.com",
                "http": { "paths": services.iter().map(|s| path_to(s)).collect::<Vec<_>>() }
            })
        })
        .collect();

    let mut spec = json!({ "rules": rules });
    if let Some(service) = default_backend {
        spec["defaultBackend"] = json!({ "service": { "name": service, "port": { "number": 80 } } });
    }

    serde_json::from_value(json!({
        "apiVersion": "networking.k8s.io/v1",
        "kind": "Ingress",
        "metadata": metadata(namespace, name, annotations),
        "spec": spec,
    }))
    .expect("valid Ingress fixture")
}

pub fn service(namespace: &str, name: &str, annotations: &[(&str, &str)]) -> Service {
    serde_json::from_value(json!({
        "apiVersion": "v1",
        "kind": "Service",
        "metadata": metadata(namespace, name, annotations),
        "spec": { "ports": [ { "port": 80, "targetPort": 8080 } ] },
    }))
    .expect("valid Service fixture")
}

pub fn backend_config(namespace: &str, name: &str, spec: Value) -> BackendConfig {
    serde_json::from_value(json!({
        "apiVersion": "cloud.google.com/v1",
        "kind": "BackendConfig",
        "metadata": metadata(namespace, name, &[]),
        "spec": spec,
    }))
    .expect("valid BackendConfig fixture")
}

pub fn frontend_config(namespace: &str, name: &str) -> FrontendConfig {
    serde_json::from_value(json!({
        "apiVersion": "networking.gke.io/v1beta1",
        "kind": "FrontendConfig",
        "metadata": metadata(namespace, name, &[]),
        "spec": { "sslPolicy": "modern" },
    }))
    .expect("valid FrontendConfig fixture")
}

/// Health check spec with the given timeout and interval
pub fn health_check(timeout_sec: i64, check_interval_sec: i64) -> Value {
    json!({
        "healthCheck": {
            "timeoutSec": timeout_sec,
            "checkIntervalSec": check_interval_sec,
        }
    })
}
