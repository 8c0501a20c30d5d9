//! # Cart Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     GOMARKETPLACE_STORAGE_KEY=@gomarketplace:products                  │
//! │     GOMARKETPLACE_CLEAR_KEY=@marketplace:products                      │
//! │     GOMARKETPLACE_DATABASE_PATH=/data/cart.db                          │
//! │     GOMARKETPLACE_LOAD_POLICY=strict                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/gomarketplace/cart.toml (Linux)                          │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [storage]
//! key = "@gomarketplace:products"
//! # clear_key = "@marketplace:products"   # reproduce the legacy clear
//! database_path = "/data/cart.db"
//!
//! [load]
//! policy = "lenient"  # lenient | strict
//! ```

use std::path::PathBuf;

use gomarketplace_core::CART_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CartError, CartResult};

// =============================================================================
// Load Policy
// =============================================================================

/// What initialization does when the durable record can't be used.
///
/// ```text
///                      read fails / record malformed
///                                  │
///                 ┌────────────────┴────────────────┐
///                 ▼                                 ▼
///   LENIENT (default)                    STRICT
///   warn!, start with empty cart         return the error from load()
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// Log the failure and start empty.
    #[default]
    Lenient,

    /// Fail initialization.
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
    type Err = CartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lenient" => Ok(LoadPolicy::Lenient),
            "strict" => Ok(LoadPolicy::Strict),
            other => Err(CartError::InvalidConfig(format!(
                "Unknown load policy: '{}'. Valid options: lenient, strict",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Where the cart record lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Key the record is read from and written to.
    #[serde(default = "default_storage_key")]
    pub key: String,

    /// Key removed before each write. Absent means `key` itself.
    #[serde(default)]
    pub clear_key: Option<String>,

    /// SQLite file. Absent means the platform data directory.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

fn default_storage_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            key: default_storage_key(),
            clear_key: None,
            database_path: None,
        }
    }
}

/// Initialization behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadSettings {
    #[serde(default)]
    pub policy: LoadPolicy,
}

// =============================================================================
// Main Cart Configuration
// =============================================================================

/// Complete cart configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub load: LoadSettings,
}

impl CartConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (cart.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CartResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading cart config from file");
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
            warn!("Failed to load cart config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CartResult<()> {
        if self.storage.key.trim().is_empty() {
            return Err(CartError::InvalidConfig(
                "storage.key must not be empty".into(),
            ));
        }

        if matches!(&self.storage.clear_key, Some(key) if key.trim().is_empty()) {
            return Err(CartError::InvalidConfig(
                "storage.clear_key must not be empty when set".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("GOMARKETPLACE_STORAGE_KEY") {
            debug!(key = %key, "Overriding storage key from environment");
            self.storage.key = key;
        }

        if let Some(key) = lookup("GOMARKETPLACE_CLEAR_KEY") {
            debug!(key = %key, "Overriding clear key from environment");
            self.storage.clear_key = Some(key);
        }

        if let Some(path) = lookup("GOMARKETPLACE_DATABASE_PATH") {
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(policy) = lookup("GOMARKETPLACE_LOAD_POLICY") {
            match policy.parse() {
                Ok(parsed) => self.load.policy = parsed,
                Err(_) => warn!(policy = %policy, "Unknown load policy in environment"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("cart.toml"))
    }

    /// Returns the configured database path, or the platform default.
    pub fn database_path(&self) -> Option<PathBuf> {
        self.storage
            .database_path
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().join("cart.db")))
    }

    /// Returns the key removed before each write.
    pub fn clear_key(&self) -> &str {
        self.storage.clear_key.as_deref().unwrap_or(self.storage.key.as_str())
    }

    /// Returns the key the record is read from and written to.
    pub fn storage_key(&self) -> &str {
        &self.storage.key
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "gomarketplace", "gomarketplace")
}

#[cfg(test)]
mod tests {
    use super::*;
    use gomarketplace_core::LEGACY_CLEAR_KEY;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = CartConfig::default();
        assert_eq!(config.storage_key(), "@gomarketplace:products");
        assert_eq!(config.clear_key(), "@gomarketplace:products");
        assert_eq!(config.load.policy, LoadPolicy::Lenient);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_policy_parsing() {
        assert_eq!("lenient".parse::<LoadPolicy>().unwrap(), LoadPolicy::Lenient);
        assert_eq!("STRICT".parse::<LoadPolicy>().unwrap(), LoadPolicy::Strict);
        assert!("sometimes".parse::<LoadPolicy>().is_err());
    }

    #[test]
    fn test_toml_file_with_legacy_clear_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");
        std::fs::write(
            &path,
            "[storage]\nclear_key = \"@marketplace:products\"\n\n[load]\npolicy = \"strict\"\n",
        )
        .unwrap();

        let config = CartConfig::load(Some(path)).unwrap();

        assert_eq!(config.storage_key(), "@gomarketplace:products");
        assert_eq!(config.clear_key(), LEGACY_CLEAR_KEY);
        assert_eq!(config.load.policy, LoadPolicy::Strict);
    }

    #[test]
    fn test_load_rejects_empty_key_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");
        std::fs::write(&path, "[storage]\nkey = \"\"\n").unwrap();

        let err = CartConfig::load(Some(path)).unwrap_err();

        assert!(matches!(err, CartError::InvalidConfig(_)));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CartConfig::load(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.storage_key(), "@gomarketplace:products");
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = toml::from_str::<CartConfig>("[storage\nkey=").unwrap_err();
        assert!(matches!(CartError::from(err), CartError::ConfigLoadFailed(_)));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("GOMARKETPLACE_STORAGE_KEY", "@test:cart"),
            ("GOMARKETPLACE_DATABASE_PATH", "/tmp/test-cart.db"),
            ("GOMARKETPLACE_LOAD_POLICY", "strict"),
        ]
        .into_iter()
        .collect();

        let mut config = CartConfig::default();
        config.apply_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.storage_key(), "@test:cart");
        assert_eq!(config.clear_key(), "@test:cart");
        assert_eq!(
            config.database_path(),
            Some(PathBuf::from("/tmp/test-cart.db"))
        );
        assert_eq!(config.load.policy, LoadPolicy::Strict);
    }

    #[test]
    fn test_unknown_policy_override_is_ignored() {
        let mut config = CartConfig::default();
        config.apply_overrides(|name| {
            (name == "GOMARKETPLACE_LOAD_POLICY").then(|| "sometimes".to_string())
        });
        assert_eq!(config.load.policy, LoadPolicy::Lenient);
    }

    #[test]
    fn test_validation_rejects_empty_keys() {
        let mut config = CartConfig::default();
        config.storage.key = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = CartConfig::default();
        config.storage.clear_key = Some(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_explicit_missing_path_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CartConfig::load_or_default(Some(dir.path().join("absent.toml")));
        assert_eq!(config.storage_key(), "@gomarketplace:products");
    }
}
