//! Existence checks for referenced objects
//!
//! Each check performs exactly one lookup. Not-found and any other access
//! error are both FAILED: either way the branch below the object cannot be
//! checked. Nothing is retried.

use crate::check::accessor::{AccessError, ClusterAccessor};
use crate::check::models::Evaluation;
use crate::models::{BackendConfig, FrontendConfig, ResourceKind, Service};

/// Turn a lookup result into a verdict naming the object
///
/// `owner` is appended to the message when the object was reached through
/// another one (a BackendConfig through its Service).
fn resolve<T>(
    kind: ResourceKind,
    namespace: &str,
    name: &str,
    owner: Option<&str>,
    result: Result<T, AccessError>,
) -> Evaluation<T> {
    let subject = match owner {
        Some(owner) => format!("{} {}/{} in {}", kind, namespace, name, owner),
        None => format!("{} {}/{}", kind, namespace, name),
    };

    match result {
        Ok(object) => {
            tracing::debug!("{} found", subject);
            Evaluation::passed(object, format!("{} found", subject))
        }
        Err(e) => {
            tracing::warn!("Lookup of {} failed: {}", subject, e);
            Evaluation::failed(format!("{} does not exist", subject))
        }
    }
}

pub async fn check_service_existence<A>(
    accessor: &A,
    namespace: &str,
    name: &str,
) -> Evaluation<Service>
where
    A: ClusterAccessor + ?Sized,
{
    let result = accessor.get_service(namespace, name).await;
    resolve(ResourceKind::Service, namespace, name, None, result)
}

pub async fn check_backend_config_existence<A>(
    accessor: &A,
    namespace: &str,
    name: &str,
    service_name: &str,
) -> Evaluation<BackendConfig>
where
    A: ClusterAccessor + ?Sized,
{
    let result = accessor.get_backend_config(namespace, name).await;
    let owner = format!("service {}/{}", namespace, service_name);
    resolve(
        ResourceKind::BackendConfig,
        namespace,
        name,
        Some(&owner),
        result,
    )
}

pub async fn check_frontend_config_existence<A>(
    accessor: &A,
    namespace: &str,
    name: &str,
) -> Evaluation<FrontendConfig>
where
    A: ClusterAccessor + ?Sized,
{
    let result = accessor.get_frontend_config(namespace, name).await;
    resolve(ResourceKind::FrontendConfig, namespace, name, None, result)
}
