//! Resource kind definitions
//!
//! Centralized enum for every kind of object the checker visits while walking
//! the reference chain from an Ingress. Used for report entries and lookup
//! messages instead of hardcoded strings.

use std::fmt;

use serde::Serialize;

/// Kinds of objects reachable from an Ingress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResourceKind {
    Ingress,
    FrontendConfig,
    Service,
    BackendConfig,
}

impl ResourceKind {
    /// Get the display name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Ingress => "Ingress",
            ResourceKind::FrontendConfig => "FrontendConfig",
            ResourceKind::Service => "Service",
            ResourceKind::BackendConfig => "BackendConfig",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
