pub mod paths;

pub use paths::{ConfigPaths, PathSource, detect_config_paths};

use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::panic::Location;
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use url::Url;

const CONFIG_FILE_NAME: &str = "client.toml";
const API_HOSTNAME: &str = "api.billing.localhost";
pub const API_URL_ENV_KEY: &str = "BILLING_API_URL";
pub const DEFAULT_API_BASE_URL: &str = const_format::concatcp!("https://", API_HOSTNAME, "/");
pub const DEFAULT_GRAPHQL_PATH: &str = "graphql";

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_graphql_path")]
    pub graphql_path: String,
    /// No timeout unless set; a started call always runs to settlement.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            graphql_path: default_graphql_path(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}
fn default_graphql_path() -> String {
    DEFAULT_GRAPHQL_PATH.to_string()
}

// ============================================
// IMPLEMENTATION
// ============================================

impl ClientConfig {
    /// Load `.env`, detect the config directory, and load `client.toml` from it.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if no directory can be determined or the file
    /// exists but is invalid.
    pub fn load_default() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => info!("Loaded .env from: {:?}", path),
            Err(e) => debug!("No .env loaded: {e}"),
        }

        let paths = detect_config_paths()?;
        debug!("Config directory from {}", paths.source);
        Self::load(&paths.config_dir)
    }

    /// Load config from {config_dir}/client.toml, then apply the
    /// `BILLING_API_URL` override.
    ///
    /// # Returns
    ///
    /// Returns `Ok(ClientConfig)` if loaded successfully or defaults if file missing.
    /// Returns `Err(ConfigError)` if file exists but is corrupted/invalid.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(|e| {
                warn!("Failed to read config file: {}", e);
                ConfigError::ReadError {
                    location: ErrorLocation::from(Location::caller()),
                    path: config_path.clone(),
                    source: e,
                }
            })?;

            let config: ClientConfig = toml::from_str(&contents).map_err(|e| {
                warn!("Failed to parse config TOML: {}", e);
                ConfigError::ParseError {
                    location: ErrorLocation::from(Location::caller()),
                    path: config_path.clone(),
                    reason: e.to_string(),
                }
            })?;

            info!("Config loaded from {}", config_path.display());
            config
        } else {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            Self::default()
        };

        if let Ok(url) = std::env::var(API_URL_ENV_KEY) {
            info!("Using {API_URL_ENV_KEY} override: {url}");
            config.api.base_url = url;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api.base_url).map_err(|e| ConfigError::ValidationError {
            location: ErrorLocation::from(Location::caller()),
            reason: format!("Invalid base_url '{}': {e}", self.api.base_url),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("base_url must be http(s), got '{}'", url.scheme()),
            });
        }

        if self.api.graphql_path.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "graphql_path cannot be empty".to_string(),
            });
        }

        if self.api.request_timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "request_timeout_secs must be positive when set".to_string(),
            });
        }

        Ok(())
    }
}
