//! Configuration Management
//!
//! Handles persistent configuration storage for rfinspect. The password is
//! never written to disk.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment fallback for the endpoint
pub const ENDPOINT_ENV: &str = "RFINSPECT_ENDPOINT";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Last used BMC endpoint
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Last used username
    #[serde(default)]
    pub username: Option<String>,
    /// Accept self-signed certificates
    #[serde(default)]
    pub insecure: bool,
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rfinspect").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(e) => {
                tracing::warn!("Failed to read config {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Parse config content, falling back to defaults on bad JSON
    fn parse(content: &str) -> Self {
        serde_json::from_str(content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed config: {}", e);
            Self::default()
        })
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Get effective endpoint (CLI > config > environment)
    pub fn effective_endpoint(&self, cli: Option<&str>) -> Option<String> {
        cli.map(str::to_string)
            .or_else(|| self.endpoint.clone())
            .or_else(|| std::env::var(ENDPOINT_ENV).ok())
            .filter(|endpoint| !endpoint.is_empty())
    }

    /// Get effective username (CLI > config)
    pub fn effective_username(&self, cli: Option<&str>) -> Option<String> {
        cli.map(str::to_string).or_else(|| self.username.clone())
    }

    /// Remember endpoint and username, then save
    pub fn remember(&mut self, endpoint: &str, username: Option<&str>, insecure: bool) -> Result<()> {
        self.endpoint = Some(endpoint.to_string());
        self.username = username.map(str::to_string);
        self.insecure = insecure;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_wins_over_config() {
        let config = Config {
            endpoint: Some("https://10.0.0.2".to_string()),
            username: Some("root".to_string()),
            insecure: false,
        };
        assert_eq!(
            config.effective_endpoint(Some("https://10.0.0.9")).as_deref(),
            Some("https://10.0.0.9")
        );
        assert_eq!(
            config.effective_endpoint(None).as_deref(),
            Some("https://10.0.0.2")
        );
        assert_eq!(config.effective_username(Some("admin")).as_deref(), Some("admin"));
        assert_eq!(config.effective_username(None).as_deref(), Some("root"));
    }

    #[test]
    fn malformed_config_falls_back_to_defaults() {
        let config = Config::parse("{not json");
        assert!(config.endpoint.is_none());
        assert!(!config.insecure);
    }

    #[test]
    fn password_is_not_a_config_field() {
        let config = Config::parse(r#"{"endpoint": "https://bmc", "password": "calvin"}"#);
        let saved = serde_json::to_string(&config).unwrap();
        assert!(!saved.contains("calvin"));
        assert_eq!(config.endpoint.as_deref(), Some("https://bmc"));
    }
}
