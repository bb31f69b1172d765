//! Platform-aware detection of the client configuration directory.
//!
//! Lookup order:
//! 1. BILLING_CONFIG_DIR environment variable (explicit override)
//! 2. Platform-specific config directory via `dirs` crate
//!
//! Returns Result, never silently falls back to a wrong path.

use crate::error::ConfigError;

use common::ErrorLocation;

use std::env;
use std::panic::Location;
use std::path::PathBuf;

use log::{debug, info};

pub const CONFIG_DIR_ENV_KEY: &str = "BILLING_CONFIG_DIR";
const APP_DIR_NAME: &str = "billing";

/// How the config directory was determined (for logging).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSource {
    /// Set via BILLING_CONFIG_DIR environment variable.
    EnvVar,
    /// Platform config directory (XDG/AppData/Library).
    PlatformDefault,
}

impl std::fmt::Display for PathSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSource::EnvVar => write!(f, "{CONFIG_DIR_ENV_KEY}"),
            PathSource::PlatformDefault => write!(f, "platform default"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_dir: PathBuf,
    pub source: PathSource,
}

/// Detect the directory holding `client.toml`.
///
/// # Errors
/// Returns [`ConfigError::DirectoryNotFound`] if neither the override nor a
/// platform config directory is available.
///
/// # Platform Behavior
/// - **Linux**: `$XDG_CONFIG_HOME/billing` or `~/.config/billing`
/// - **macOS**: `~/Library/Application Support/billing`
/// - **Windows**: `%APPDATA%/billing`
pub fn detect_config_paths() -> Result<ConfigPaths, ConfigError> {
    if let Ok(custom_dir) = env::var(CONFIG_DIR_ENV_KEY) {
        let config_dir = PathBuf::from(&custom_dir);
        info!("Using {CONFIG_DIR_ENV_KEY} override: {:?}", config_dir);

        return Ok(ConfigPaths {
            config_dir,
            source: PathSource::EnvVar,
        });
    }

    if let Some(base) = dirs::config_dir() {
        let config_dir = base.join(APP_DIR_NAME);
        debug!("Using platform config directory: {:?}", config_dir);

        return Ok(ConfigPaths {
            config_dir,
            source: PathSource::PlatformDefault,
        });
    }

    Err(ConfigError::DirectoryNotFound {
        location: ErrorLocation::from(Location::caller()),
        reason: format!("{CONFIG_DIR_ENV_KEY} is unset and no platform config directory exists"),
    })
}
