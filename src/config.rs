//! Configuration handling for the TUI

use crate::api::DEFAULT_BASE_URL;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpointConfig {
    /// Backend address
    pub api_base_url: Option<String>,
    /// Name shown in the user section of the sidebar
    pub user_name: Option<String>,
    /// Email shown in the user section of the sidebar
    pub user_email: Option<String>,
}

impl UpointConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("br", "upoint", "upoint-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: UpointConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    pub fn base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn user_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or("User")
    }

    pub fn user_email(&self) -> &str {
        self.user_email.as_deref().unwrap_or("usuario@exemplo.com")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = UpointConfig::default();
        assert!(config.api_base_url.is_none());
        assert!(config.user_name.is_none());
        assert!(config.user_email.is_none());
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.user_name(), "User");
    }

    #[test]
    fn test_serialization() {
        let config = UpointConfig {
            api_base_url: Some("http://localhost:8080".to_string()),
            user_name: Some("Maria Souza".to_string()),
            user_email: Some("maria@upoint.com".to_string()),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: UpointConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.base_url(), "http://localhost:8080");
        assert_eq!(parsed.user_name(), "Maria Souza");
        assert_eq!(parsed.user_email(), "maria@upoint.com");
    }

    #[test]
    fn test_blank_base_url_falls_back_to_default() {
        let config = UpointConfig {
            api_base_url: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: UpointConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.api_base_url.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"user_name": "Ana", "unknown_field": "value"}"#;
        let parsed: UpointConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.user_name(), "Ana");
    }

    #[test]
    fn test_load_returns_ok() {
        let result = UpointConfig::load();
        assert!(result.is_ok());
    }
}
