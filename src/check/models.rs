//! Data structures for check results

use std::fmt;

use serde::Serialize;

use crate::models::ResourceKind;

/// Outcome of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckVerdict {
    /// The rule is satisfied
    Passed,
    /// The rule is violated, or a referenced object is missing or malformed
    Failed,
    /// A prerequisite annotation is absent so the rule does not apply
    Skipped,
}

impl CheckVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckVerdict::Passed => "PASSED",
            CheckVerdict::Failed => "FAILED",
            CheckVerdict::Skipped => "SKIPPED",
        }
    }
}

impl fmt::Display for CheckVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fixed identifier of each rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CheckId {
    FrontendConfigCheck,
    IngressRuleCheck,
    ServiceExistenceCheck,
    #[serde(rename = "L7ILBNegAnnotationCheck")]
    L7IlbNegAnnotationCheck,
    AppProtocolAnnotationCheck,
    BackendConfigAnnotationCheck,
    BackendConfigExistenceCheck,
    HealthCheckConfigCheck,
}

impl CheckId {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckId::FrontendConfigCheck => "FrontendConfigCheck",
            CheckId::IngressRuleCheck => "IngressRuleCheck",
            CheckId::ServiceExistenceCheck => "ServiceExistenceCheck",
            CheckId::L7IlbNegAnnotationCheck => "L7ILBNegAnnotationCheck",
            CheckId::AppProtocolAnnotationCheck => "AppProtocolAnnotationCheck",
            CheckId::BackendConfigAnnotationCheck => "BackendConfigAnnotationCheck",
            CheckId::BackendConfigExistenceCheck => "BackendConfigExistenceCheck",
            CheckId::HealthCheckConfigCheck => "HealthCheckConfigCheck",
        }
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Verdict of one rule together with whatever the rule resolved
///
/// `value` carries the object or payload the next hop needs (a fetched
/// Service, the parsed backend config names, ...). It is only set when the
/// traversal may continue past this check.
#[derive(Debug, Clone)]
pub struct Evaluation<T = ()> {
    pub value: Option<T>,
    pub verdict: CheckVerdict,
    pub message: String,
}

impl<T> Evaluation<T> {
    pub fn passed(value: T, message: impl Into<String>) -> Self {
        Self {
            value: Some(value),
            verdict: CheckVerdict::Passed,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            value: None,
            verdict: CheckVerdict::Failed,
            message: message.into(),
        }
    }

    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            value: None,
            verdict: CheckVerdict::Skipped,
            message: message.into(),
        }
    }
}

/// A single recorded check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRecord {
    id: CheckId,
    message: String,
    verdict: CheckVerdict,
}

impl CheckRecord {
    pub fn new(id: CheckId, message: impl Into<String>, verdict: CheckVerdict) -> Self {
        Self {
            id,
            message: message.into(),
            verdict,
        }
    }

    pub fn id(&self) -> CheckId {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn verdict(&self) -> CheckVerdict {
        self.verdict
    }
}

/// All checks run for one top-level resource, in traversal order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceReport {
    pub kind: ResourceKind,
    pub namespace: String,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<CheckRecord>,
}

impl ResourceReport {
    pub fn new(kind: ResourceKind, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            namespace: namespace.into(),
            name: name.into(),
            checks: Vec::new(),
        }
    }

    /// Append a check; records are never reordered or deduplicated
    pub fn add_check(&mut self, id: CheckId, message: impl Into<String>, verdict: CheckVerdict) {
        self.checks.push(CheckRecord::new(id, message, verdict));
    }

    /// Record an evaluation and hand back its value for the next hop
    pub fn record<T>(&mut self, id: CheckId, evaluation: Evaluation<T>) -> Option<T> {
        self.add_check(id, evaluation.message, evaluation.verdict);
        evaluation.value
    }

    /// Checks with the given identifier, in order
    pub fn checks_with_id(&self, id: CheckId) -> impl Iterator<Item = &CheckRecord> {
        self.checks.iter().filter(move |check| check.id == id)
    }
}

/// Final output of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ResourceReport>,
    /// Pipeline-level errors that aborted the run
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl Report {
    pub fn from_resources(resources: Vec<ResourceReport>) -> Self {
        Self {
            resources,
            errors: Vec::new(),
        }
    }

    pub fn from_error(error: impl fmt::Display) -> Self {
        Self {
            resources: Vec::new(),
            errors: vec![error.to_string()],
        }
    }

    pub fn is_aborted(&self) -> bool {
        !self.errors.is_empty()
    }
}
