//! Configuration system
//!
//! Settings come from built-in defaults, an optional YAML file in the
//! config directory and environment overrides. Command-line flags win over
//! all of them.

pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::Config;

/// Configuration keys as written in the config file
pub const KEYS: &[&str] = &[
    "kubeconfig",
    "context",
    "namespace",
    "output",
    "requestTimeoutSecs",
];

/// Get a configuration value by key
///
/// Unset optional values are returned as an empty string.
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    match key {
        "kubeconfig" => Ok(config
            .kubeconfig
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_default()),
        "context" => Ok(config.context.clone().unwrap_or_default()),
        "namespace" => Ok(config.namespace.clone().unwrap_or_default()),
        "output" => Ok(config.output.to_string()),
        "requestTimeoutSecs" => Ok(config
            .request_timeout_secs
            .map(|secs| secs.to_string())
            .unwrap_or_default()),
        _ => Err(anyhow::anyhow!(
            "Unknown configuration key: {}. Known keys: {}",
            key,
            KEYS.join(", ")
        )),
    }
}
