//! Ingress consistency checks
//!
//! Follows the references hanging off each Ingress (FrontendConfig, Services,
//! BackendConfigs) and records one verdict per hop. Lookups go through a
//! [`ClusterAccessor`], so the checks run the same against a live cluster or
//! an in-memory snapshot.

pub mod accessor;
pub mod existence;
pub mod models;
pub mod pipeline;
pub mod rules;

pub use accessor::{AccessError, ClusterAccessor};
pub use models::{CheckId, CheckRecord, CheckVerdict, Evaluation, Report, ResourceReport};
pub use pipeline::Pipeline;

use crate::kube::{ClientOptions, KubeAccessor};

/// Errors that abort a whole run
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("Error connecting to Kubernetes: {0}")]
    Connection(String),

    #[error("Error listing ingresses: {0}")]
    List(#[source] AccessError),
}

/// Connect to the cluster and check every Ingress in `namespace`
///
/// Fatal errors end up in [`Report::errors`]; the returned report is always
/// renderable.
pub async fn check_all_ingresses(options: &ClientOptions, namespace: Option<&str>) -> Report {
    match KubeAccessor::connect(options).await {
        Ok(accessor) => Pipeline::new(accessor).run(namespace).await,
        Err(e) => {
            tracing::error!("{}", e);
            Report::from_error(e)
        }
    }
}
