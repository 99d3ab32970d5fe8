//! Centralized configuration for docsearch
//!
//! Configuration priority:
//! 1. Environment variables
//! 2. Config file (docsearch.toml in the working directory or
//!    ~/.config/docsearch/config.toml)
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "docsearch.toml";

pub const ENV_API_BASE: &str = "DOCSEARCH_API_BASE";
pub const ENV_USER_ID: &str = "DOCSEARCH_USER_ID";
pub const ENV_TIMEOUT_SECS: &str = "DOCSEARCH_TIMEOUT_SECS";

// ============================================================================
// Client Configuration
// ============================================================================

/// Where requests go and who they are sent as
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the retrieval service, without a trailing path
    pub base_url: String,

    /// Value of the `user_id` query parameter
    pub user_id: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            user_id: "test_user".to_string(),
            timeout_secs: 30,
        }
    }
}

// ============================================================================
// Search Configuration
// ============================================================================

/// Values used when a numeric form field is left blank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchDefaults {
    pub default_top_k: i64,
    pub default_threshold: f64,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            default_top_k: 5,
            default_threshold: 0.5,
        }
    }
}

// ============================================================================
// Main Configuration
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub search: SearchDefaults,
}

impl Config {
    /// Load configuration from a file
    ///
    /// Looks for `docsearch.toml` in the current directory or
    /// `~/.config/docsearch/config.toml`
    pub fn load() -> anyhow::Result<Self> {
        if let Some(config) = Self::load_from(Path::new(CONFIG_FILE_NAME))? {
            return Ok(config);
        }

        if let Some(config_path) = Self::user_config_path() {
            if let Some(config) = Self::load_from(&config_path)? {
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Parse a single config file. `Ok(None)` when the file does not exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(Self::from_toml(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration with overrides from environment variables
    pub fn load_with_env() -> anyhow::Result<Self> {
        let mut config = Self::load()?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup. Blank values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(base) = get(ENV_API_BASE) {
            self.client.base_url = base.trim().to_string();
        }

        if let Some(user) = get(ENV_USER_ID) {
            self.client.user_id = user.trim().to_string();
        }

        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            self.client.timeout_secs = secs.trim().parse().map_err(|_| {
                anyhow::anyhow!("{} must be a whole number of seconds, got {:?}", ENV_TIMEOUT_SECS, secs)
            })?;
        }

        Ok(())
    }

    /// Path of the per-user config file, if a config directory exists
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("docsearch").join("config.toml"))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.client.base_url, "http://localhost:8000");
        assert_eq!(config.client.user_id, "test_user");
        assert_eq!(config.search.default_top_k, 5);
        assert_eq!(config.search.default_threshold, 0.5);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [client]
            user_id = "alice"
            "#,
        )
        .unwrap();
        assert_eq!(config.client.user_id, "alice");
        assert_eq!(config.client.base_url, "http://localhost:8000");
        assert_eq!(config.search, SearchDefaults::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "[search]\ndefault_top_k = 10\ndefault_threshold = 0.25\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap().unwrap();
        assert_eq!(config.search.default_top_k, 10);
        assert_eq!(config.search.default_threshold, 0.25);
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Config::load_from(&missing).unwrap().is_none());
    }

    #[test]
    fn test_user_config_path_layout() {
        if let Some(path) = Config::user_config_path() {
            assert!(path.ends_with("docsearch/config.toml"));
        }
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_API_BASE, "http://search.internal:9000"),
            (ENV_USER_ID, "  bob "),
            (ENV_TIMEOUT_SECS, "5"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_env(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.client.base_url, "http://search.internal:9000");
        assert_eq!(config.client.user_id, "bob");
        assert_eq!(config.client.timeout_secs, 5);
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let mut config = Config::default();
        config
            .apply_env(|k| (k == ENV_USER_ID).then(|| "   ".to_string()))
            .unwrap();
        assert_eq!(config.client.user_id, "test_user");
    }

    #[test]
    fn test_bad_timeout_is_error() {
        let mut config = Config::default();
        let res = config.apply_env(|k| (k == ENV_TIMEOUT_SECS).then(|| "soon".to_string()));
        assert!(res.is_err());
    }

    #[test]
    fn test_toml_roundtrip_is_loadable() {
        let text = Config::default().to_toml().unwrap();
        assert!(text.contains("[client]"));
        assert_eq!(Config::from_toml(&text).unwrap(), Config::default());
    }
}
