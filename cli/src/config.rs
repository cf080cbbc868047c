// Configuration management for the cardfile CLI
//
// Cross-platform config stored in:
// - macOS: ~/.config/cardfile/config.json
// - Linux: ~/.config/cardfile/config.json
// - Windows: %APPDATA%\cardfile\config.json

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Email offered as the default at the login prompt
    pub email: Option<String>,

    /// Group filter applied when the shell starts ("all" or a group id)
    pub filter: String,

    /// Display settings
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Print record identifiers in listings
    pub show_ids: bool,

    /// Print phone numbers in listings
    pub show_phone: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            email: None,
            filter: "all".to_string(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_ids: false,
            show_phone: true,
        }
    }
}

impl Config {
    /// Get the config directory path (cross-platform)
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("cardfile");

        // Create directory if it doesn't exist
        std::fs::create_dir_all(&config_dir)
            .context("Failed to create config directory")?;

        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default if not exists
    pub fn load() -> Result<Self> {
        let config_file = Self::config_file()?;

        if config_file.exists() {
            let contents = std::fs::read_to_string(&config_file)
                .context("Failed to read config file")?;
            let config: Config = serde_json::from_str(&contents)
                .context("Failed to parse config file")?;
            Ok(config)
        } else {
            // Create default config
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let config_file = Self::config_file()?;
        let contents = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(&config_file, contents)
            .context("Failed to write config file")?;
        Ok(())
    }

    /// Set a config value
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "email" => {
                self.email = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "filter" => {
                self.filter = if value.is_empty() {
                    "all".to_string()
                } else {
                    value.to_string()
                };
            }
            "show_ids" => {
                self.display.show_ids = value.parse()
                    .context("Invalid boolean value")?;
            }
            "show_phone" => {
                self.display.show_phone = value.parse()
                    .context("Invalid boolean value")?;
            }
            _ => anyhow::bail!("Unknown config key: {}", key),
        }
        self.save()?;
        Ok(())
    }

    /// Get a config value
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "email" => self.email.clone(),
            "filter" => Some(self.filter.clone()),
            "show_ids" => Some(self.display.show_ids.to_string()),
            "show_phone" => Some(self.display.show_phone.to_string()),
            _ => None,
        }
    }

    /// List all config values
    pub fn list(&self) -> Vec<(String, String)> {
        vec![
            ("email".to_string(), self.email.clone().unwrap_or_else(|| "(unset)".to_string())),
            ("filter".to_string(), self.filter.clone()),
            ("show_ids".to_string(), self.display.show_ids.to_string()),
            ("show_phone".to_string(), self.display.show_phone.to_string()),
        ]
    }
}
