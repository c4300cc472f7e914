use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::core::HOME_CURRENCY;

/// One foreign currency offered by the application.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CurrencyInfo {
    pub code: String,
    pub name: String,
    pub symbol: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: "https://economia.awesomeapi.com.br".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            listen: "127.0.0.1:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_currencies")]
    pub currencies: Vec<CurrencyInfo>,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            currencies: default_currencies(),
            provider: ProviderConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

fn default_currencies() -> Vec<CurrencyInfo> {
    [
        ("USD", "US Dollar", "US$"),
        ("EUR", "Euro", "€"),
        ("GBP", "British Pound", "£"),
    ]
    .into_iter()
    .map(|(code, name, symbol)| CurrencyInfo {
        code: code.to_string(),
        name: name.to_string(),
        symbol: symbol.to_string(),
    })
    .collect()
}

impl AppConfig {
    /// Loads the config from the default path, falling back to built-in
    /// defaults when no file exists there.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "cambio")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Metadata for an offered foreign currency, `None` for anything else
    /// (including the home currency).
    pub fn currency(&self, code: &str) -> Option<&CurrencyInfo> {
        self.currencies.iter().find(|c| c.code == code)
    }

    /// True for the home currency and every offered foreign currency.
    pub fn knows(&self, code: &str) -> bool {
        code == HOME_CURRENCY || self.currency(code).is_some()
    }
}
