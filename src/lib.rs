//! GKE Ingress consistency checker
//!
//! This library provides the checks behind the `kubectl check-gke-ingress`
//! plugin. It can be used both as a binary and as a library for testing.

pub mod check;
pub mod cli;
pub mod config;
pub mod kube;
pub mod models;
pub mod report;

// Re-export commonly used types for convenience
pub use check::{
    AccessError, CheckError, CheckId, CheckVerdict, ClusterAccessor, Pipeline, Report,
    ResourceReport,
};
pub use report::OutputFormat;
