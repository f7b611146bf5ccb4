//! Configuration schema definitions
//!
//! Defines the structure of the config file using serde for serialization.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::report::OutputFormat;

/// Root configuration structure
///
/// Every field is optional on disk; command-line flags take precedence over
/// anything set here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Kubeconfig file to use instead of the default discovery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Only check ingresses from this namespace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Report format
    #[serde(default)]
    pub output: OutputFormat,

    /// Per-request read timeout against the API server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn request_timeout(&self) -> Option<std::time::Duration> {
        self.request_timeout_secs
            .map(std::time::Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.output, OutputFormat::Json);
        assert!(config.namespace.is_none());
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_config_deserialization() {
        let yaml = r#"
kubeconfig: /tmp/kubeconfig
namespace: shop
output: standard
requestTimeoutSecs: 30
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.kubeconfig, Some(PathBuf::from("/tmp/kubeconfig")));
        assert_eq!(config.namespace.as_deref(), Some("shop"));
        assert_eq!(config.output, OutputFormat::Standard);
        assert_eq!(
            config.request_timeout(),
            Some(std::time::Duration::from_secs(30))
        );
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result: Result<Config, _> = serde_yaml::from_str("readOnly: true\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_serialization_skips_unset() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        assert_eq!(yaml.trim(), "output: json");
    }
}
