//! kubectl check-gke-ingress
//!
//! Checks that every Ingress in the cluster, and the FrontendConfigs,
//! Services and BackendConfigs it references, are consistent, and prints a
//! report of the results.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use check_gke_ingress::{
    check,
    cli::{self, ConfigSubcommand},
    config::{Config, ConfigLoader},
    kube::ClientOptions,
    report::{self, OutputFormat},
};

/// Check the consistency of GKE Ingress and related resources
#[derive(Parser, Debug)]
#[command(name = "kubectl check-gke-ingress")]
#[command(about = "Check the consistency of GKE Ingress and related resources", long_about = None)]
struct Args {
    /// Kubeconfig file to use
    #[arg(long, short = 'k')]
    kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use
    #[arg(long, short = 'c')]
    context: Option<String>,

    /// Only check resources from this namespace
    #[arg(long, short = 'n')]
    namespace: Option<String>,

    /// Output format
    #[arg(long, short = 'o', value_enum)]
    output: Option<OutputFormat>,

    /// Write debug logs to a temporary log file
    #[arg(long, short = 'd')]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show version information
    Version,
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

impl Args {
    /// Layer the command-line flags over the loaded configuration
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(kubeconfig) = &self.kubeconfig {
            config.kubeconfig = Some(kubeconfig.clone());
        }
        if let Some(context) = &self.context {
            config.context = Some(context.clone());
        }
        if let Some(namespace) = &self.namespace {
            config.namespace = Some(namespace.clone());
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_file = cli::init_logging(args.debug)?;
    if let Some(ref log_path) = log_file {
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    match args.command {
        Some(Command::Version) => {
            cli::display_version();
            return Ok(());
        }
        Some(Command::Config { ref subcommand }) => {
            return cli::handle_config_command(subcommand.clone());
        }
        None => {}
    }

    let config = args.apply_to(ConfigLoader::load().context("Failed to load configuration")?);
    tracing::debug!("Effective configuration: {:?}", config);

    let options = ClientOptions {
        kubeconfig: config.kubeconfig.clone(),
        context: config.context.clone(),
        request_timeout: config.request_timeout(),
    };

    let report = check::check_all_ingresses(&options, config.namespace.as_deref()).await;
    println!("{}", report::render(&report, config.output)?);

    if report.is_aborted() {
        std::process::exit(1);
    }

    Ok(())
}
