use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 25;

fn default_items_per_page() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

/// Optional colour overrides, as `#RRGGBB` or `#RGB`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_dim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battle_green: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battle_yellow: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Characters per page
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,

    /// Snapshot used when no --data argument is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_path: Option<PathBuf>,

    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            data_path: None,
            theme: ThemeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("charbazaar");

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, falling back to defaults. Never written back.
    pub fn load() -> Self {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(e) => {
                tracing::debug!("{}", e);
                return AppConfig::default();
            }
        };

        if !path.exists() {
            return AppConfig::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Failed to parse config: {}", e),
            },
            Err(e) => tracing::warn!("Failed to read config: {}", e),
        }

        AppConfig::default()
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut config: AppConfig = toml::from_str(content)?;

        if config.items_per_page == 0 {
            tracing::warn!(
                "items_per_page must be positive, using {}",
                DEFAULT_ITEMS_PER_PAGE
            );
            config.items_per_page = DEFAULT_ITEMS_PER_PAGE;
        }

        Ok(config)
    }
}
