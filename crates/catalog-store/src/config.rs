//! # Catalog Configuration
//!
//! API location and the timing constants of the stores.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CATALOG_API_URL=http://localhost:3000                              │
//! │     CATALOG_SEARCH_DEBOUNCE_MS=150                                     │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/catalog-manager/catalog.toml (Linux)                     │
//! │     ~/Library/Application Support/com.storefront.catalog-manager/      │
//! │       catalog.toml (macOS)                                             │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "https://fakestoreapi.com"
//! products_path = "/products"
//! categories_path = "/products/categories"
//! timeout_secs = 30
//!
//! [timing]
//! search_debounce_ms = 300
//! search_delay_ms = 300
//! toast_duration_ms = 3000
//! close_animation_ms = 500
//! ```

use std::path::PathBuf;
use std::time::Duration;

use catalog_client::http::{DEFAULT_BASE_URL, DEFAULT_CATEGORIES_PATH, DEFAULT_PRODUCTS_PATH};
use catalog_client::ClientConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "catalog.toml";

// =============================================================================
// API Settings
// =============================================================================

/// Where the product API lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// API root.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Products collection path.
    #[serde(default = "default_products_path")]
    pub products_path: String,

    /// Category list path.
    #[serde(default = "default_categories_path")]
    pub categories_path: String,

    /// Request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_products_path() -> String {
    DEFAULT_PRODUCTS_PATH.to_string()
}

fn default_categories_path() -> String {
    DEFAULT_CATEGORIES_PATH.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            products_path: default_products_path(),
            categories_path: default_categories_path(),
            timeout_secs: default_timeout(),
        }
    }
}

// =============================================================================
// Timing Settings
// =============================================================================

/// Delays used by the stores.
///
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                         Store Timers                                    │
/// │                                                                         │
/// │  search_debounce_ms   quiet period before a typed term is applied      │
/// │  search_delay_ms      simulated work while the loading flag is shown   │
/// │  toast_duration_ms    default toast lifetime                           │
/// │  close_animation_ms   side panel CLOSING → CLOSED                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingSettings {
    #[serde(default = "default_search_debounce")]
    pub search_debounce_ms: u64,

    #[serde(default = "default_search_delay")]
    pub search_delay_ms: u64,

    #[serde(default = "default_toast_duration")]
    pub toast_duration_ms: u64,

    #[serde(default = "default_close_animation")]
    pub close_animation_ms: u64,
}

fn default_search_debounce() -> u64 {
    300
}
fn default_search_delay() -> u64 {
    300
}
fn default_toast_duration() -> u64 {
    3000
}
fn default_close_animation() -> u64 {
    500
}

impl Default for TimingSettings {
    fn default() -> Self {
        TimingSettings {
            search_debounce_ms: default_search_debounce(),
            search_delay_ms: default_search_delay(),
            toast_duration_ms: default_toast_duration(),
            close_animation_ms: default_close_animation(),
        }
    }
}

impl TimingSettings {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_delay_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    pub fn close_animation(&self) -> Duration {
        Duration::from_millis(self.close_animation_ms)
    }
}

// =============================================================================
// Main Catalog Configuration
// =============================================================================

/// Complete catalog configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub timing: TimingSettings,
}

impl CatalogConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (catalog.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading catalog config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load catalog config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Catalog config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        let url = &self.api.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(StoreError::InvalidConfig(format!(
                "API URL must start with http:// or https://, got: {}",
                url
            )));
        }

        for (name, path) in [
            ("products_path", &self.api.products_path),
            ("categories_path", &self.api.categories_path),
        ] {
            if !path.starts_with('/') {
                return Err(StoreError::InvalidConfig(format!(
                    "{} must start with '/', got: {}",
                    name, path
                )));
            }
        }

        if self.api.timeout_secs == 0 {
            return Err(StoreError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup; unparsable numbers are ignored.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("CATALOG_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        let numeric = |key: &str| -> Option<u64> {
            let raw = lookup(key)?;
            match raw.parse::<u64>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(key, value = %raw, "Ignoring non-numeric override");
                    None
                }
            }
        };

        if let Some(secs) = numeric("CATALOG_API_TIMEOUT_SECS") {
            self.api.timeout_secs = secs;
        }
        if let Some(ms) = numeric("CATALOG_SEARCH_DEBOUNCE_MS") {
            self.timing.search_debounce_ms = ms;
        }
        if let Some(ms) = numeric("CATALOG_SEARCH_DELAY_MS") {
            self.timing.search_delay_ms = ms;
        }
        if let Some(ms) = numeric("CATALOG_TOAST_DURATION_MS") {
            self.timing.toast_duration_ms = ms;
        }
        if let Some(ms) = numeric("CATALOG_CLOSE_ANIMATION_MS") {
            self.timing.close_animation_ms = ms;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "catalog-manager")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Settings for the HTTP product service.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api.base_url.clone(),
            products_path: self.api.products_path.clone(),
            categories_path: self.api.categories_path.clone(),
            timeout: Duration::from_secs(self.api.timeout_secs),
        }
    }
}
