use crate::currency::RateTable;
use crate::directory::DEFAULT_PAGE_SIZE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "DIRSEARCH_CONFIG";

/// User configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Currency amounts are typed and displayed in
    pub default_currency: String,
    /// Listing page size
    pub page_size: usize,
    /// Rates (units per 1 USD) layered over the built-in table
    pub rates: HashMap<String, f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_currency: "USD".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            rates: HashMap::new(),
        }
    }
}

impl Config {
    /// Built-in rates with the configured overrides applied
    pub fn rate_table(&self) -> RateTable {
        RateTable::default().with_overrides(&self.rates)
    }
}

/// Get the path to the configuration file
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    let config_dir = dirs::config_dir()
        .context("Cannot determine config directory")?;

    Ok(config_dir.join("company-directory").join("config.json"))
}

/// Load the configuration from its default location
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Load the configuration from `path`, or defaults if the file doesn't exist
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let config: Config = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    debug!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_currency, "USD");
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "defaultCurrency": "EUR", "rates": { "EUR": 0.5 } }"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.default_currency, "EUR");
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.rate_table().rate("EUR"), 0.5);
        assert_eq!(config.rate_table().rate("GBP"), 0.79);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
