//! # Store Configuration
//!
//! Where the inventory file lives and how it is loaded and saved.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SHELF_INVENTORY_PATH=/srv/shop/inventory.txt                       │
//! │     SHELF_LOAD_POLICY=strict                                           │
//! │     SHELF_ATOMIC_WRITES=false                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/shelf/shelf.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.shelf.inventory/shelf.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     <data dir>/inventory.txt, lenient load, atomic writes              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [storage]
//! path = "/srv/shop/inventory.txt"
//! atomic_writes = true
//!
//! [load]
//! policy = "lenient"  # lenient | strict
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

/// File name of the inventory inside the default data directory.
pub const DEFAULT_INVENTORY_FILE: &str = "inventory.txt";

/// File name of the configuration inside the default config directory.
pub const CONFIG_FILE: &str = "shelf.toml";

// =============================================================================
// Load Policy
// =============================================================================

/// What loading does with a line that cannot be decoded.
///
/// ```text
/// LENIENT (Default)                 STRICT
/// ─────────────────                 ──────
/// • skip the line, log a warning    • fail the whole load
/// • record it in the LoadReport     • no store is constructed
/// • keep every other record         • use when the file must be exact
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// Skip malformed lines.
    #[default]
    Lenient,

    /// Abort on the first malformed line.
    Strict,
}

impl std::fmt::Display for LoadPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadPolicy::Lenient => write!(f, "lenient"),
            LoadPolicy::Strict => write!(f, "strict"),
        }
    }
}

impl std::str::FromStr for LoadPolicy {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lenient" | "skip" => Ok(LoadPolicy::Lenient),
            "strict" | "abort" => Ok(LoadPolicy::Strict),
            other => Err(StoreError::InvalidConfig(format!(
                "Unknown load policy: '{}'. Valid options: lenient, strict",
                other
            ))),
        }
    }
}

// =============================================================================
// Settings Sections
// =============================================================================

/// Inventory file settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Path of the inventory file.
    #[serde(default = "default_inventory_path")]
    pub path: PathBuf,

    /// Write through a temporary file and rename it over the target.
    #[serde(default = "default_true")]
    pub atomic_writes: bool,
}

fn default_inventory_path() -> PathBuf {
    directories::ProjectDirs::from("com", "shelf", "inventory")
        .map(|dirs| dirs.data_dir().join(DEFAULT_INVENTORY_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INVENTORY_FILE))
}

fn default_true() -> bool {
    true
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            path: default_inventory_path(),
            atomic_writes: true,
        }
    }
}

/// Load behavior settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSettings {
    /// Handling of malformed lines.
    #[serde(default)]
    pub policy: LoadPolicy,
}

// =============================================================================
// Main Store Configuration
// =============================================================================

/// Complete store configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Inventory file settings.
    #[serde(default)]
    pub storage: StorageSettings,

    /// Load behavior settings.
    #[serde(default)]
    pub load: LoadSettings,
}

impl StoreConfig {
    /// Creates a config with defaults for the given inventory path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            storage: StorageSettings {
                path: path.into(),
                ..StorageSettings::default()
            },
            load: LoadSettings::default(),
        }
    }

    /// Sets the load policy.
    pub fn policy(mut self, policy: LoadPolicy) -> Self {
        self.load.policy = policy;
        self
    }

    /// Sets whether saves go through a temporary file.
    pub fn atomic_writes(mut self, atomic: bool) -> Self {
        self.storage.atomic_writes = atomic;
        self
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (shelf.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(path = %path.display(), "Loading store config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| StoreError::ConfigLoadFailed(e.to_string()))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(path = %path.display(), "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load store config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;

        info!(path = %path.display(), "Store config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        if self.storage.path.as_os_str().is_empty() {
            return Err(StoreError::InvalidConfig(
                "storage.path must not be empty".into(),
            ));
        }

        if self.storage.path.file_name().is_none() {
            return Err(StoreError::InvalidConfig(format!(
                "storage.path must name a file, got: {}",
                self.storage.path.display()
            )));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("SHELF_INVENTORY_PATH") {
            debug!(path = %path, "Overriding inventory path from environment");
            self.storage.path = PathBuf::from(path);
        }

        if let Ok(policy) = std::env::var("SHELF_LOAD_POLICY") {
            match policy.parse() {
                Ok(parsed) => self.load.policy = parsed,
                Err(_) => warn!(policy = %policy, "Unknown load policy in environment"),
            }
        }

        if let Ok(atomic) = std::env::var("SHELF_ATOMIC_WRITES") {
            match atomic.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.storage.atomic_writes = true,
                "0" | "false" | "no" => self.storage.atomic_writes = false,
                _ => warn!(value = %atomic, "Unknown SHELF_ATOMIC_WRITES value in environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shelf", "inventory")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the inventory file path.
    pub fn inventory_path(&self) -> &std::path::Path {
        &self.storage.path
    }

    /// Returns the load policy.
    pub fn load_policy(&self) -> LoadPolicy {
        self.load.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_policy_parsing() {
        assert_eq!("lenient".parse::<LoadPolicy>().unwrap(), LoadPolicy::Lenient);
        assert_eq!("SKIP".parse::<LoadPolicy>().unwrap(), LoadPolicy::Lenient);
        assert_eq!("strict".parse::<LoadPolicy>().unwrap(), LoadPolicy::Strict);
        assert_eq!("abort".parse::<LoadPolicy>().unwrap(), LoadPolicy::Strict);
        assert!("maybe".parse::<LoadPolicy>().is_err());
        assert_eq!(LoadPolicy::Strict.to_string(), "strict");
    }

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert!(config.storage.atomic_writes);
        assert_eq!(config.load_policy(), LoadPolicy::Lenient);
        assert_eq!(
            config.inventory_path().file_name().unwrap(),
            DEFAULT_INVENTORY_FILE
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let config = StoreConfig::new("");
        assert!(config.validate().unwrap_err().is_config_error());

        let config = StoreConfig::new("/");
        assert!(config.validate().is_err());

        let config = StoreConfig::new("/srv/shop/inventory.txt");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = StoreConfig::new("stock.txt")
            .policy(LoadPolicy::Strict)
            .atomic_writes(false);

        assert_eq!(config.inventory_path(), std::path::Path::new("stock.txt"));
        assert_eq!(config.load_policy(), LoadPolicy::Strict);
        assert!(!config.storage.atomic_writes);
    }

    #[test]
    fn test_toml_partial_file_uses_defaults() {
        let config: StoreConfig = toml::from_str(
            r#"
            [load]
            policy = "strict"
            "#,
        )
        .unwrap();

        assert_eq!(config.load_policy(), LoadPolicy::Strict);
        assert!(config.storage.atomic_writes);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("conf").join(CONFIG_FILE);

        let config = StoreConfig::new(dir.path().join("inventory.txt")).policy(LoadPolicy::Strict);
        config.save(Some(config_path.clone())).unwrap();

        let contents = std::fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("[storage]"));
        assert!(contents.contains("[load]"));

        let parsed: StoreConfig = toml::from_str(&contents).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err: StoreError = toml::from_str::<StoreConfig>("[load]\npolicy = 3")
            .unwrap_err()
            .into();
        assert!(err.is_config_error());
    }
}
