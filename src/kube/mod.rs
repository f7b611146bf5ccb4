//! Kubernetes client module
//!
//! Handles connection to the Kubernetes API server and provides the
//! [`KubeAccessor`] the check pipeline reads the cluster through.
//!
//! Config resolution:
//! 1. An explicit kubeconfig file (`--kubeconfig`), with an optional context
//! 2. The default kubeconfig (`KUBECONFIG` or `~/.kube/config`) when only a
//!    context is given
//! 3. Otherwise `Config::infer()` (in-cluster config, then the kubeconfig)

mod accessor;

pub use accessor::KubeAccessor;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};

/// How to reach the cluster
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientOptions {
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
    /// Read timeout applied to every API call
    pub request_timeout: Option<Duration>,
}

/// Initialize and return a Kubernetes client
pub async fn create_client(options: &ClientOptions) -> Result<Client> {
    let config = load_config(options).await?;
    tracing::debug!("Using Kubernetes API server {}", config.cluster_url);

    let client = Client::try_from(config).context("Failed to create Kubernetes client")?;
    Ok(client)
}

/// Load Kubernetes configuration
async fn load_config(options: &ClientOptions) -> Result<Config> {
    let kube_options = KubeConfigOptions {
        context: options.context.clone(),
        ..Default::default()
    };

    let mut config = match (&options.kubeconfig, &options.context) {
        (Some(path), _) => {
            let kubeconfig = Kubeconfig::read_from(path)
                .with_context(|| format!("Failed to read kubeconfig: {}", path.display()))?;
            Config::from_custom_kubeconfig(kubeconfig, &kube_options)
                .await
                .with_context(|| format!("Failed to load kubeconfig: {}", path.display()))?
        }
        (None, Some(context)) => Config::from_kubeconfig(&kube_options)
            .await
            .with_context(|| format!("Failed to load kubeconfig context '{}'", context))?,
        (None, None) => Config::infer()
            .await
            .context("Failed to infer Kubernetes configuration")?,
    };

    if let Some(timeout) = options.request_timeout {
        config.read_timeout = Some(timeout);
    }

    Ok(config)
}
