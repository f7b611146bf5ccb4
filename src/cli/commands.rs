//! CLI command handlers

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::config::{self, ConfigLoader, paths};

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigSubcommand {
    /// Get a configuration value, or all of them
    Get {
        /// Configuration key (e.g., "namespace", "output")
        key: Option<String>,
    },
    /// List the effective configuration
    List,
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate,
}

/// Handle configuration subcommands
pub fn handle_config_command(cmd: ConfigSubcommand) -> Result<()> {
    match cmd {
        ConfigSubcommand::Get { key: Some(key) } => {
            let config = ConfigLoader::load().context("Failed to load configuration")?;
            println!("{}", config::get_config_value(&config, &key)?);
        }
        ConfigSubcommand::Get { key: None } => {
            let config = ConfigLoader::load().context("Failed to load configuration")?;
            for key in config::KEYS {
                println!("{}: {}", key, config::get_config_value(&config, key)?);
            }
        }
        ConfigSubcommand::List => {
            let config = ConfigLoader::load().context("Failed to load configuration")?;
            let yaml =
                serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
            print!("{}", yaml);
        }
        ConfigSubcommand::Path => {
            println!("{}", paths::root_config_path().display());
        }
        ConfigSubcommand::Validate => {
            ConfigLoader::validate().context("Configuration validation failed")?;
            println!("Configuration is valid");
        }
    }

    Ok(())
}
