//! Rule evaluators
//!
//! One function per rule. Apart from the frontend config check, which has to
//! look its target up, every rule is a pure function of objects that were
//! already fetched.

use k8s_openapi::api::networking::v1::{HTTPIngressRuleValue, IngressRule};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use crate::check::accessor::ClusterAccessor;
use crate::check::existence::check_frontend_config_existence;
use crate::check::models::Evaluation;
use crate::models::annotations::{self, Annotation, AppProtocol, BackendConfigs};
use crate::models::{BackendConfig, FrontendConfig, Ingress, Service};

/// `namespace/name` of an object
pub(crate) fn object_key(meta: &ObjectMeta) -> String {
    format!(
        "{}/{}",
        meta.namespace.as_deref().unwrap_or_default(),
        meta.name.as_deref().unwrap_or_default()
    )
}

/// FrontendConfig named by the Ingress must exist
pub async fn check_frontend_config<A>(accessor: &A, ingress: &Ingress) -> Evaluation<FrontendConfig>
where
    A: ClusterAccessor + ?Sized,
{
    let Some(name) = annotations::frontend_config_name(&ingress.metadata) else {
        return Evaluation::skipped(format!(
            "Ingress {} does not have FrontendConfig annotation",
            object_key(&ingress.metadata)
        ));
    };

    let namespace = ingress.metadata.namespace.as_deref().unwrap_or_default();
    check_frontend_config_existence(accessor, namespace, name).await
}

/// An ingress rule needs an HTTP value to route anything
pub fn check_ingress_rule(rule: &IngressRule) -> Evaluation<&HTTPIngressRuleValue> {
    match rule.http.as_ref() {
        Some(http) => Evaluation::passed(http, "IngressRule has HTTPIngressRuleValue"),
        None => Evaluation::failed("IngressRule has no HTTPIngressRuleValue"),
    }
}

/// Declared app protocols must all be HTTP, HTTPS or HTTP2
pub fn check_app_protocol_annotation(service: &Service) -> Evaluation {
    let key = object_key(&service.metadata);

    let protocols = match annotations::app_protocols(&service.metadata) {
        Annotation::Absent => {
            return Evaluation::skipped(format!(
                "Service {} does not have AppProtocolAnnotation",
                key
            ));
        }
        Annotation::Malformed(e) => {
            tracing::debug!("AppProtocol annotation on {} does not parse: {}", key, e);
            return Evaluation::failed(format!(
                "AppProtocol annotation is in invalid format in service {}",
                key
            ));
        }
        Annotation::Valid(protocols) => protocols,
    };

    if let Some((port, protocol)) = protocols
        .iter()
        .find(|(_, protocol)| AppProtocol::parse_optional(protocol).is_none())
    {
        return Evaluation::failed(format!(
            "Invalid port application protocol in service {}: {} (port {})",
            key, protocol, port
        ));
    }

    Evaluation::passed((), format!("AppProtocol annotation is valid in service {}", key))
}

/// Services behind an internal L7 load balancer need a NEG annotation that
/// does not opt the Service into external ingress NEGs
pub fn check_l7_ilb_neg_annotation(service: &Service) -> Evaluation {
    let key = object_key(&service.metadata);

    match annotations::neg(&service.metadata) {
        Annotation::Absent => Evaluation::failed(format!(
            "No Neg annotation found in service {} for internal HTTP(S) load balancing",
            key
        )),
        Annotation::Malformed(e) => {
            tracing::debug!("Neg annotation on {} does not parse: {}", key, e);
            Evaluation::failed(format!(
                "Invalid Neg annotation found in service {} for internal HTTP(S) load balancing",
                key
            ))
        }
        Annotation::Valid(neg) if neg.ingress => Evaluation::failed(format!(
            "Neg annotation ingress field is set to true in service {} for internal HTTP(S) load balancing",
            key
        )),
        Annotation::Valid(_) => Evaluation::passed(
            (),
            format!(
                "Neg annotation is set correctly in service {} for internal HTTP(S) load balancing",
                key
            ),
        ),
    }
}

/// Backend config annotation must parse; yields the referenced names
pub fn check_backend_config_annotation(service: &Service) -> Evaluation<BackendConfigs> {
    let key = object_key(&service.metadata);

    match annotations::backend_configs(&service.metadata) {
        Annotation::Absent => Evaluation::skipped(format!(
            "Service {} does not have backendconfig annotation",
            key
        )),
        Annotation::Malformed(e) => {
            tracing::debug!("BackendConfig annotation on {} does not parse: {}", key, e);
            Evaluation::failed(format!(
                "BackendConfig annotation is invalid in service {}",
                key
            ))
        }
        Annotation::Valid(configs) => Evaluation::passed(
            configs,
            format!("BackendConfig annotation is valid in service {}", key),
        ),
    }
}

/// Health check timeout must not exceed its probe interval
pub fn check_health_check_config(backend_config: &BackendConfig, service_name: &str) -> Evaluation {
    let namespace = backend_config
        .metadata
        .namespace
        .as_deref()
        .unwrap_or_default();
    let subject = format!(
        "BackendConfig {} in service {}/{}",
        object_key(&backend_config.metadata),
        namespace,
        service_name
    );

    let Some(health_check) = backend_config.spec.health_check.as_ref() else {
        return Evaluation::skipped(format!("{} does not have healthcheck specified", subject));
    };

    let timeout = health_check.effective_timeout();
    let interval = health_check.effective_check_interval();
    if timeout > interval {
        return Evaluation::failed(format!(
            "{} has healthcheck timeoutSec ({}) greater than checkIntervalSec ({})",
            subject, timeout, interval
        ));
    }

    Evaluation::passed((), format!("{} healthcheck configuration is valid", subject))
}
