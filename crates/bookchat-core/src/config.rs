//! Configuration management for Bookchat.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main application configuration.
///
/// This is loaded from `~/.config/bookchat/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General application settings
    pub general: GeneralConfig,
    /// Route table and history settings
    pub router: RouterConfig,
    /// Persisted state settings
    pub store: StoreConfig,
    /// Icon library settings
    pub icons: IconConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(&config_path)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `BOOKCHAT_BASE_URL`: Override the router base prefix
    /// - `BOOKCHAT_CASE_SENSITIVE`: Override case-sensitive matching (true/false)
    /// - `BOOKCHAT_HISTORY_LIMIT`: Override the history capacity
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup.
    ///
    /// Unparseable values are ignored and the configured value is kept.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup("BOOKCHAT_BASE_URL") {
            tracing::debug!("Override router.base from env: {}", base);
            self.router.base = base;
        }

        if let Some(val) = lookup("BOOKCHAT_CASE_SENSITIVE") {
            if let Ok(sensitive) = val.parse() {
                self.router.case_sensitive = sensitive;
                tracing::debug!("Override router.case_sensitive from env: {}", sensitive);
            }
        }

        if let Some(val) = lookup("BOOKCHAT_HISTORY_LIMIT") {
            if let Ok(limit) = val.parse() {
                self.router.history_limit = limit;
                tracing::debug!("Override router.history_limit from env: {}", limit);
            }
        }
    }

    /// Check values that serde cannot check on its own.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.router.base.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "router.base".to_string(),
                reason: format!("must start with '/', got '{}'", self.router.base),
            });
        }

        if !matches!(self.store.default_storage.as_str(), "local" | "session") {
            return Err(ConfigError::InvalidValue {
                field: "store.default_storage".to_string(),
                reason: format!(
                    "expected 'local' or 'session', got '{}'",
                    self.store.default_storage
                ),
            });
        }

        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/bookchat/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "bookchat", "bookchat").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path.
    ///
    /// Uses XDG base directories: `~/.local/share/bookchat`
    pub fn data_dir() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "bookchat", "bookchat").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Directory used by the local store backend.
    ///
    /// `store.data_dir` wins over the XDG data directory.
    pub fn store_dir(&self) -> ConfigResult<PathBuf> {
        match &self.store.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::data_dir()?.join("store")),
        }
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Display name of the site
    pub app_name: String,
    /// CSS selector of the element the shell mounts onto
    pub mount_selector: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            app_name: "Bookchat".to_string(),
            mount_selector: "#app".to_string(),
        }
    }
}

/// Route table and history settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Base prefix stripped from every path before matching
    pub base: String,
    /// Match static segments case-sensitively
    pub case_sensitive: bool,
    /// Maximum history entries kept (0 = unbounded)
    pub history_limit: usize,
    /// Optional TOML file replacing the built-in route table
    pub routes_file: Option<PathBuf>,
    /// View reported by the shell while no route matches
    pub not_found_view: Option<String>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base: "/".to_string(),
            case_sensitive: false,
            history_limit: 0,
            routes_file: None,
            not_found_view: None,
        }
    }
}

/// Persisted state settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Storage used when a store does not pick one: `local` or `session`
    pub default_storage: String,
    /// Directory for the local backend (defaults to the XDG data dir)
    pub data_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_storage: "local".to_string(),
            data_dir: None,
        }
    }
}

/// Icon library settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    /// Icon packs registered at startup, by prefix
    pub packs: Vec<String>,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            packs: vec!["fas".to_string(), "far".to_string(), "fab".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.general.mount_selector, "#app");
        assert_eq!(config.router.base, "/");
        assert!(!config.router.case_sensitive);
        assert_eq!(config.store.default_storage, "local");
        assert_eq!(config.icons.packs, vec!["fas", "far", "fab"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[router]"));
        assert!(toml_str.contains("[store]"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.router.base, config.router.base);
    }

    #[test]
    fn test_config_file_round_trip() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");

        let mut config = AppConfig::default();
        config.router.base = "/app/".to_string();
        config.router.history_limit = 50;

        let contents = toml::to_string_pretty(&config).expect("serialize config");
        fs::write(&config_path, contents).expect("write config file");

        let loaded_contents = fs::read_to_string(&config_path).expect("read config file");
        let loaded: AppConfig = toml::from_str(&loaded_contents).expect("parse loaded config");

        assert_eq!(loaded.router.base, "/app/");
        assert_eq!(loaded.router.history_limit, 50);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("BOOKCHAT_BASE_URL", "/forum"),
            ("BOOKCHAT_CASE_SENSITIVE", "true"),
            ("BOOKCHAT_HISTORY_LIMIT", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env(|key| vars.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.router.base, "/forum");
        assert!(config.router.case_sensitive);
        // Unparseable value keeps the default
        assert_eq!(config.router.history_limit, 0);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[router]
base = "/bookchat"
not_found_view = "NotFoundView"
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.router.base, "/bookchat");
        assert_eq!(config.router.not_found_view.as_deref(), Some("NotFoundView"));
        // These should be defaults
        assert_eq!(config.general.mount_selector, "#app");
        assert_eq!(config.store.default_storage, "local");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.router.base = "app".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "router.base"
        ));

        let mut config = AppConfig::default();
        config.store.default_storage = "cloud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_store_dir_override() {
        let mut config = AppConfig::default();
        config.store.data_dir = Some(PathBuf::from("/tmp/bookchat-store"));
        assert_eq!(
            config.store_dir().expect("store dir"),
            PathBuf::from("/tmp/bookchat-store")
        );
    }
}
