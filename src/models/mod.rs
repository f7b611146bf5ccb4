//! Model layer
//!
//! Rust types for the objects on the Ingress reference chain.
//!
//! Structure:
//! - `resource_kind.rs` - Kinds of objects the checker visits
//! - `annotations.rs` - Annotation keys and typed annotation payloads
//! - `backend_config.rs` / `frontend_config.rs` - GKE custom resources
//!
//! Core Kubernetes types (`Ingress`, `Service`) come from `k8s-openapi`.

pub mod annotations;
pub mod backend_config;
pub mod frontend_config;
pub mod resource_kind;

pub use backend_config::{BackendConfig, BackendConfigSpec, HealthCheckConfig};
pub use frontend_config::{FrontendConfig, FrontendConfigSpec};
pub use resource_kind::ResourceKind;

pub use k8s_openapi::api::core::v1::Service;
pub use k8s_openapi::api::networking::v1::Ingress;
