//! Split configuration
//!
//! Configuration lives in `<config dir>/split/config.toml` unless a path is
//! given explicitly or through `$SPLIT_CONFIG`. Every section has defaults,
//! so a missing file is not an error.
//!
//! The extraction API key may come from `$GEMINI_API_KEY` or `$API_KEY`
//! instead of the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::ConfigError;

const CONFIG_DIR_NAME: &str = "split";
const CONFIG_FILE: &str = "config.toml";

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "SPLIT_CONFIG";

/// Environment variables checked for the extraction API key, in order
pub const API_KEY_ENVS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Receipt extraction service settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractionConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Transport timeout for the single extraction request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ExtractionConfig {
    /// Usable only when enabled and a non-blank key is present
    pub fn is_usable(&self) -> bool {
        self.enabled
            && self
                .api_key
                .as_deref()
                .is_some_and(|key| !key.trim().is_empty())
    }
}

/// HTTP service settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Largest accepted request body (receipt photos arrive base64-encoded)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_bind() -> String {
    "127.0.0.1:7866".to_string()
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error), overridden by RUST_LOG
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SplitConfig {
    #[serde(default)]
    pub extraction: ExtractionConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl SplitConfig {
    /// Resolve the config path and load it, then apply env overrides.
    /// A missing file yields defaults; a malformed one is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(config_path);

        let mut config = match path {
            Some(path) if path.exists() => {
                info!("Loading config from {}", path.display());
                Self::load_from(&path)?
            }
            Some(path) => {
                if explicit.is_some() {
                    warn!("Config file {} not found, using defaults", path.display());
                } else {
                    debug!("No config at {}, using defaults", path.display());
                }
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env();
        Ok(config)
    }

    /// Parse one TOML file without env overrides
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save config as pretty TOML
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Fill the API key from the environment when the file has none
    pub fn apply_env(&mut self) {
        self.apply_api_key(API_KEY_ENVS.iter().find_map(|name| std::env::var(name).ok()));
    }

    fn apply_api_key(&mut self, key: Option<String>) {
        if self.extraction.api_key.is_some() {
            return;
        }
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.extraction.api_key = Some(key.trim().to_string());
        }
    }
}

/// Default config file path
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SplitConfig::default();
        assert!(config.extraction.enabled);
        assert_eq!(config.extraction.model, "gemini-2.5-flash");
        assert_eq!(config.extraction.timeout_secs, 60);
        assert!(config.extraction.api_key.is_none());
        assert!(!config.extraction.is_usable());
        assert_eq!(config.server.bind, "127.0.0.1:7866");
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: SplitConfig = toml::from_str(
            r#"
            [extraction]
            model = "gemini-2.0-flash"
            api_key = "abc"
            "#,
        )
        .unwrap();
        assert_eq!(config.extraction.model, "gemini-2.0-flash");
        assert!(config.extraction.is_usable());
        assert_eq!(config.extraction.timeout_secs, 60);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_api_key_from_env_does_not_override_file() {
        let mut config = SplitConfig::default();
        config.apply_api_key(Some(" from-env ".to_string()));
        assert_eq!(config.extraction.api_key.as_deref(), Some("from-env"));

        config.apply_api_key(Some("other".to_string()));
        assert_eq!(config.extraction.api_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_blank_key_not_usable() {
        let mut config = SplitConfig::default();
        config.apply_api_key(Some("   ".to_string()));
        assert!(config.extraction.api_key.is_none());

        config.extraction.api_key = Some(" ".to_string());
        assert!(!config.extraction.is_usable());
    }

    #[test]
    fn test_disabled_not_usable() {
        let mut config = SplitConfig::default();
        config.extraction.api_key = Some("key".to_string());
        config.extraction.enabled = false;
        assert!(!config.extraction.is_usable());
    }

    #[test]
    fn test_toml_serialization_skips_missing_key() {
        let toml_str = toml::to_string_pretty(&SplitConfig::default()).unwrap();
        assert!(toml_str.contains("[extraction]"));
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[log]"));
        assert!(!toml_str.contains("api_key"));
    }
}
