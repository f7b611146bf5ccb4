//! CLI command handling module
//!
//! Handles the subcommands and logging setup of the kubectl plugin.

mod commands;
mod logging;
mod version;

pub use commands::{ConfigSubcommand, handle_config_command};
pub use logging::init_logging;
pub use version::display_version;
