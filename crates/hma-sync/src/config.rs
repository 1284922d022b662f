//! # Office Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     HMA_DB_PATH=/srv/hma/hma.db                                         │
//! │     HMA_NOTIFY_ENABLED=false                                            │
//! │     HMA_NOTIFY_URL=https://example.org/hook                             │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     ~/.config/office/office.toml (Linux)                                │
//! │     ~/Library/Application Support/my.hma.office/office.toml (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     database in the platform data dir, notifications off               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [storage]
//! database_path = "/srv/hma/hma.db"
//!
//! [notify]
//! enabled = true
//! endpoint = "https://script.example.org/exec"
//! timeout_secs = 10
//! queue_capacity = 64
//!
//! [firm]
//! name = "HAIRI MUSTAFA ASSOCIATES"
//! default_logo = "https://arleta.site/interactivelink/2510/logo.png"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{SyncError, SyncResult};

const CONFIG_FILE: &str = "office.toml";
const DATABASE_FILE: &str = "hma.db";

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("my", "hma", "office")
}

// =============================================================================
// Storage Settings
// =============================================================================

/// Where the state database lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
}

fn default_database_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
        .unwrap_or_else(|| PathBuf::from(DATABASE_FILE))
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            database_path: default_database_path(),
        }
    }
}

// =============================================================================
// Notification Settings
// =============================================================================

/// Outbound notification settings.
///
/// Notifications go out only when `enabled` is set and an endpoint is
/// configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// http(s) URL receiving one JSON POST per notification.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Notifications queued before new ones are dropped.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u64 {
    10
}

fn default_queue_capacity() -> usize {
    64
}

impl Default for NotifyConfig {
    fn default() -> Self {
        NotifyConfig {
            enabled: true,
            endpoint: None,
            timeout_secs: default_timeout(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl NotifyConfig {
    /// Config pointing at `endpoint` with default limits.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        NotifyConfig {
            endpoint: Some(endpoint.into()),
            ..NotifyConfig::default()
        }
    }

    /// True when notifications will actually be sent.
    pub fn is_active(&self) -> bool {
        self.enabled && self.endpoint.is_some()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parses and checks the endpoint. `Ok(None)` when none is configured.
    pub fn endpoint_url(&self) -> SyncResult<Option<Url>> {
        let Some(raw) = self.endpoint.as_deref() else {
            return Ok(None);
        };

        let url = Url::parse(raw)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SyncError::InvalidUrl(format!(
                "Endpoint must start with http:// or https://, got: {}",
                raw
            )));
        }
        Ok(Some(url))
    }
}

// =============================================================================
// Firm Settings
// =============================================================================

/// Letterhead details printed on documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirmConfig {
    #[serde(default = "default_firm_name")]
    pub name: String,

    /// Logo reference used when no logo has been uploaded.
    #[serde(default = "default_logo")]
    pub default_logo: String,
}

fn default_firm_name() -> String {
    hma_core::FIRM_NAME.to_string()
}

fn default_logo() -> String {
    hma_core::DEFAULT_LOGO.to_string()
}

impl Default for FirmConfig {
    fn default() -> Self {
        FirmConfig {
            name: default_firm_name(),
            default_logo: default_logo(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete office configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfficeConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub notify: NotifyConfig,

    #[serde(default)]
    pub firm: FirmConfig,
}

impl OfficeConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (office.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SyncResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading office config from file");
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
            warn!("Failed to load office config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> SyncResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| SyncError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Office config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SyncResult<()> {
        if self.storage.database_path.as_os_str().is_empty() {
            return Err(SyncError::InvalidConfig(
                "storage.database_path must not be empty".into(),
            ));
        }

        self.notify.endpoint_url()?;

        if self.notify.timeout_secs == 0 {
            return Err(SyncError::InvalidConfig(
                "notify.timeout_secs must be greater than 0".into(),
            ));
        }

        if self.notify.queue_capacity == 0 {
            return Err(SyncError::InvalidConfig(
                "notify.queue_capacity must be greater than 0".into(),
            ));
        }

        if self.firm.name.trim().is_empty() {
            return Err(SyncError::InvalidConfig("firm.name must not be empty".into()));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup` (the process environment in
    /// production).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("HMA_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = PathBuf::from(path);
        }

        if let Some(flag) = lookup("HMA_NOTIFY_ENABLED") {
            match parse_flag(&flag) {
                Some(enabled) => self.notify.enabled = enabled,
                None => warn!(value = %flag, "Ignoring unrecognised HMA_NOTIFY_ENABLED"),
            }
        }

        if let Some(url) = lookup("HMA_NOTIFY_URL") {
            debug!(url = %url, "Overriding notify endpoint from environment");
            self.notify.endpoint = if url.trim().is_empty() { None } else { Some(url) };
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
