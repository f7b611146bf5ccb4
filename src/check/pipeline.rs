//! Check pipeline
//!
//! Walks the reference chain of every Ingress depth-first:
//!
//! ```text
//! Ingress ─┬─ FrontendConfig
//!          └─ rules / default backend ─ Service ─┬─ NEG (internal L7 only)
//!                                                ├─ app protocols
//!                                                └─ backend configs ─ BackendConfig ─ health check
//! ```
//!
//! A branch stops as soon as the object it hangs off is missing or its
//! reference cannot be parsed. Sibling branches are unaffected. Checks run one
//! at a time, and each Ingress gets its own [`ResourceReport`] so the record
//! order is the traversal order.

use crate::check::CheckError;
use crate::check::accessor::ClusterAccessor;
use crate::check::existence::{check_backend_config_existence, check_service_existence};
use crate::check::models::{CheckId, Report, ResourceReport};
use crate::check::rules::{
    check_app_protocol_annotation, check_backend_config_annotation, check_frontend_config,
    check_health_check_config, check_ingress_rule, check_l7_ilb_neg_annotation,
};
use crate::models::annotations::{self, BackendConfigs};
use crate::models::{Ingress, ResourceKind};

/// Runs every check against the objects reachable through an accessor
pub struct Pipeline<A> {
    accessor: A,
}

impl<A: ClusterAccessor> Pipeline<A> {
    pub fn new(accessor: A) -> Self {
        Self { accessor }
    }

    pub fn accessor(&self) -> &A {
        &self.accessor
    }

    /// Check every Ingress and fold a listing failure into the report
    pub async fn run(&self, namespace: Option<&str>) -> Report {
        match self.check_all_ingresses(namespace).await {
            Ok(resources) => Report::from_resources(resources),
            Err(e) => {
                tracing::error!("{}", e);
                Report::from_error(e)
            }
        }
    }

    /// Check every Ingress in `namespace`, or in all namespaces when `None`
    pub async fn check_all_ingresses(
        &self,
        namespace: Option<&str>,
    ) -> Result<Vec<ResourceReport>, CheckError> {
        let ingresses = self
            .accessor
            .list_ingresses(namespace.map(str::to_string))
            .await
            .map_err(CheckError::List)?;

        tracing::debug!("Checking {} ingresses", ingresses.len());

        let mut reports = Vec::with_capacity(ingresses.len());
        for ingress in &ingresses {
            reports.push(self.check_ingress(ingress).await);
        }
        Ok(reports)
    }

    /// Run the full chain for one Ingress
    pub async fn check_ingress(&self, ingress: &Ingress) -> ResourceReport {
        let namespace = ingress.metadata.namespace.clone().unwrap_or_default();
        let name = ingress.metadata.name.clone().unwrap_or_default();
        tracing::debug!("Checking ingress {}/{}", namespace, name);

        let mut report = ResourceReport::new(ResourceKind::Ingress, &namespace, &name);

        // The frontend config result never gates the backend side
        let frontend = check_frontend_config(&self.accessor, ingress).await;
        report.record(CheckId::FrontendConfigCheck, frontend);

        let service_names = collect_service_names(ingress, &mut report);
        let l7_ilb = annotations::is_l7_ilb(&ingress.metadata);

        for service_name in &service_names {
            self.check_service(&mut report, &namespace, service_name, l7_ilb)
                .await;
        }

        report
    }

    async fn check_service(
        &self,
        report: &mut ResourceReport,
        namespace: &str,
        service_name: &str,
        l7_ilb: bool,
    ) {
        let existence = check_service_existence(&self.accessor, namespace, service_name).await;
        let Some(service) = report.record(CheckId::ServiceExistenceCheck, existence) else {
            return;
        };

        if l7_ilb {
            report.record(
                CheckId::L7IlbNegAnnotationCheck,
                check_l7_ilb_neg_annotation(&service),
            );
        }
        report.record(
            CheckId::AppProtocolAnnotationCheck,
            check_app_protocol_annotation(&service),
        );

        let annotation = check_backend_config_annotation(&service);
        if let Some(configs) = report.record(CheckId::BackendConfigAnnotationCheck, annotation) {
            self.check_backend_configs(report, namespace, service_name, &configs)
                .await;
        }
    }

    async fn check_backend_configs(
        &self,
        report: &mut ResourceReport,
        namespace: &str,
        service_name: &str,
        configs: &BackendConfigs,
    ) {
        for name in configs.names() {
            let existence =
                check_backend_config_existence(&self.accessor, namespace, name, service_name)
                    .await;
            let Some(backend_config) = report.record(CheckId::BackendConfigExistenceCheck, existence)
            else {
                continue;
            };
            report.record(
                CheckId::HealthCheckConfigCheck,
                check_health_check_config(&backend_config, service_name),
            );
        }
    }
}

/// Service names referenced by an Ingress, in first-seen order
///
/// The default backend comes first, then every path of every rule that has an
/// HTTP value. Each rule's shape check is recorded as it is visited. Names are
/// not deduplicated.
pub fn collect_service_names(ingress: &Ingress, report: &mut ResourceReport) -> Vec<String> {
    let mut names = Vec::new();
    let Some(spec) = ingress.spec.as_ref() else {
        return names;
    };

    if let Some(service) = spec
        .default_backend
        .as_ref()
        .and_then(|backend| backend.service.as_ref())
    {
        names.push(service.name.clone());
    }

    for rule in spec.rules.iter().flatten() {
        let Some(http) = report.record(CheckId::IngressRuleCheck, check_ingress_rule(rule)) else {
            continue;
        };
        names.extend(
            http.paths
                .iter()
                .filter_map(|path| path.backend.service.as_ref())
                .map(|service| service.name.clone()),
        );
    }

    names
}
