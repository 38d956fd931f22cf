/// Configuration module for jobfeed.
///
/// Handles loading, validating, and providing default configuration values.
/// Every field has a serde default, so a partial file only overrides what it
/// names.
use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::parser::DEFAULT_LINK_HOST;
use crate::registry::{SourceGroup, builtin_tabs, find_tab};

/// Config file used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "jobfeed.json";

// ── Default value functions ──────────────────────────────────────────

fn default_link_host() -> String {
    DEFAULT_LINK_HOST.to_string()
}

fn default_user_agent() -> String {
    format!("jobfeed/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

// ── Config structs ───────────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// Substring identifying apply links in a table row.
    #[serde(default = "default_link_host")]
    pub link_host: String,

    #[serde(default)]
    pub http: HttpConfig,

    /// Category tabs. Replaces the built-in registry when present.
    #[serde(default = "builtin_tabs")]
    pub tabs: Vec<SourceGroup>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout; `0` disables it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

// ── Default impls ────────────────────────────────────────────────────

impl Default for Config {
    fn default() -> Self {
        Self {
            link_host: default_link_host(),
            http: HttpConfig::default(),
            tabs: builtin_tabs(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// ── Config implementation ────────────────────────────────────────────

impl Config {
    /// Load configuration from a JSON file.
    ///
    /// If `config_path` is empty, defaults to [`DEFAULT_CONFIG_PATH`].
    /// If the file does not exist, returns a default config and generates a
    /// template when the default path was used.
    pub fn load(config_path: &str) -> Result<Self> {
        let path = if config_path.is_empty() {
            DEFAULT_CONFIG_PATH
        } else {
            config_path
        };

        if !Path::new(path).exists() {
            info!("{path} not found, using defaults");
            let cfg = Self::default();

            if path == DEFAULT_CONFIG_PATH {
                match cfg.save(path) {
                    Ok(()) => info!("Generated config template: {path}"),
                    Err(e) => warn!("Failed to generate config template: {e}"),
                }
            }

            return Ok(cfg);
        }

        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {path}"))?;

        let mut cfg: Config = match serde_json::from_str(&data) {
            Ok(c) => c,
            Err(e) => {
                warn!("Invalid JSON in {path}: {e}");
                warn!("Using default configuration");
                return Ok(Self::default());
            }
        };

        info!("Loaded configuration from {path}");

        if cfg.link_host.trim().is_empty() {
            cfg.link_host = default_link_host();
        }

        Ok(cfg)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &str) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("failed to marshal config")?;
        std::fs::write(path, data).with_context(|| format!("failed to write config: {path}"))?;
        Ok(())
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.link_host.is_empty(), "link_host must not be empty");
        anyhow::ensure!(!self.tabs.is_empty(), "at least one tab must be configured");

        let mut seen = HashSet::new();
        for tab in &self.tabs {
            anyhow::ensure!(seen.insert(tab.id.as_str()), "duplicate tab id: {}", tab.id);
            anyhow::ensure!(!tab.sources.is_empty(), "tab {} has no sources", tab.id);
            for source in &tab.sources {
                anyhow::ensure!(
                    source.url.starts_with("http://") || source.url.starts_with("https://"),
                    "tab {}: source URL must be http(s): {}",
                    tab.id,
                    source.url
                );
            }
        }
        Ok(())
    }

    /// Look a configured tab up by id.
    #[must_use]
    pub fn tab(&self, id: &str) -> Option<&SourceGroup> {
        find_tab(&self.tabs, id)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TableKind;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.link_host, "jobright.ai/jobs/info");
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.http.user_agent.starts_with("jobfeed/"));
        assert_eq!(config.tabs.len(), 2);
        assert!(config.tab("h1b").is_some());
    }

    #[test]
    fn test_load_from_json() {
        let json = r#"{"http": {"timeout_secs": 5}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.http.timeout_secs, 5);
        // Other fields should have defaults
        assert_eq!(config.link_host, "jobright.ai/jobs/info");
        assert!(config.http.user_agent.starts_with("jobfeed/"));
        assert_eq!(config.tabs.len(), 2);
    }

    #[test]
    fn test_tabs_override() {
        let json = r#"{
            "tabs": [{
                "id": "mirror",
                "name": "Mirror",
                "kind": "h1b",
                "sources": [{"url": "https://mirror.example/README.md"}],
                "samples": ["h1b"]
            }]
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.tabs.len(), 1);
        let tab = config.tab("mirror").unwrap();
        assert_eq!(tab.kind, TableKind::H1b);
        assert!(config.tab("h1b").is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_ok() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_duplicate_tab() {
        let mut config = Config::default();
        let dup = config.tabs[0].clone();
        config.tabs.push(dup);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_tab_without_samples() {
        let mut config = Config::default();
        config.tabs[0].samples.clear();
        assert!(config.validate().is_ok());
        assert!(!config.tabs[0].sample_keys().is_empty());
    }

    #[test]
    fn test_validate_bad_url() {
        let mut config = Config::default();
        config.tabs[0].sources[0].url = "ftp://example.com/README.md".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.tabs.len(), 2);
        // Templates are only written for the default path.
        assert!(!path.exists());
    }

    #[test]
    fn test_load_invalid_json_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobfeed.json");
        let path = path.to_str().unwrap();

        let mut config = Config::default();
        config.link_host = "jobs.example.com/apply".to_string();
        config.save(path).unwrap();

        let loaded = Config::load(path).unwrap();
        assert_eq!(loaded.link_host, "jobs.example.com/apply");
        assert_eq!(loaded.tabs, config.tabs);
    }

    #[test]
    fn test_blank_link_host_restored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, r#"{"link_host": "  "}"#).unwrap();
        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.link_host, DEFAULT_LINK_HOST);
    }
}
