//! Cross-platform config path resolution
//!
//! - Linux/macOS: XDG_CONFIG_HOME or ~/.config
//! - Windows: Known Folder API (AppData\Roaming)

use std::path::PathBuf;

pub const APP_NAME: &str = "check-gke-ingress";
pub const CONFIG_DIR_ENV: &str = "CHECK_GKE_INGRESS_CONFIG_DIR";

/// Get the configuration directory path
///
/// Checks CHECK_GKE_INGRESS_CONFIG_DIR first, then falls back to:
/// - Unix (Linux/macOS): XDG_CONFIG_HOME/check-gke-ingress or ~/.config/check-gke-ingress
/// - Windows: %APPDATA%\check-gke-ingress\config
pub fn config_dir() -> PathBuf {
    std::env::var(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            #[cfg(windows)]
            {
                use directories::ProjectDirs;
                ProjectDirs::from("", "", APP_NAME)
                    .map(|dirs| dirs.config_dir().to_path_buf())
                    .unwrap_or_else(|| PathBuf::from(".").join(".config").join(APP_NAME))
            }
            #[cfg(not(windows))]
            {
                use directories::BaseDirs;
                std::env::var("XDG_CONFIG_HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| {
                        BaseDirs::new()
                            .map(|dirs| dirs.home_dir().join(".config"))
                            .unwrap_or_else(|| PathBuf::from(".").join(".config"))
                    })
                    .join(APP_NAME)
            }
        })
}

/// Get the root configuration file path
pub fn root_config_path() -> PathBuf {
    config_dir().join("config.yaml")
}
