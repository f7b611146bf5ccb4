//! Configuration loading and merging logic
//!
//! Handles loading configuration from multiple sources and merging them
//! according to precedence rules.

use super::{paths, schema::Config};
use crate::report::OutputFormat;
use anyhow::{Context, Result};
use std::path::Path;

pub const NAMESPACE_ENV: &str = "CHECK_GKE_INGRESS_NAMESPACE";
pub const OUTPUT_ENV: &str = "CHECK_GKE_INGRESS_OUTPUT";
pub const CONTEXT_ENV: &str = "CHECK_GKE_INGRESS_CONTEXT";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Root config file
    /// 3. Built-in defaults
    ///
    /// Command-line flags are applied on top by the caller.
    pub fn load() -> Result<Config> {
        let path = paths::root_config_path();
        let config = if path.exists() {
            Self::load_file(&path)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Config::default()
        };

        Self::apply_env_overrides(config, |key| std::env::var(key).ok())
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the config file and environment overrides
    ///
    /// Fails on invalid YAML, unknown keys, invalid value types, an
    /// unsupported output format or a zero request timeout.
    pub fn validate() -> Result<()> {
        let config = Self::load().context("Failed to load merged configuration")?;
        Self::check_values(&config)
    }

    fn check_values(config: &Config) -> Result<()> {
        if config.request_timeout_secs == Some(0) {
            return Err(anyhow::anyhow!("requestTimeoutSecs must be greater than 0"));
        }
        if let Some(path) = &config.kubeconfig {
            if !path.exists() {
                return Err(anyhow::anyhow!(
                    "kubeconfig file not found: {}",
                    path.display()
                ));
            }
        }
        Ok(())
    }

    /// Apply environment variable overrides read through `lookup`
    pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(namespace) = lookup(NAMESPACE_ENV) {
            config.namespace = Some(namespace);
        }

        if let Some(context) = lookup(CONTEXT_ENV) {
            config.context = Some(context);
        }

        if let Some(output) = lookup(OUTPUT_ENV) {
            config.output = output
                .parse::<OutputFormat>()
                .map_err(|e| anyhow::anyhow!("{}: {}", OUTPUT_ENV, e))?;
        }

        Ok(config)
    }
}
