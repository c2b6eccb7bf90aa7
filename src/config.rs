//! Application configuration file handling
//!
//! The configuration is a small JSON document. Every field has a default, so
//! an empty object `{}` is a valid configuration file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Dishes API used when nothing else is configured
pub const DEFAULT_ENDPOINT: &str = "https://edu.std-900.ist.mospolytech.ru/labs/api/dishes";

/// Access key of the dishes API, sent as the `key` query parameter
pub const DEFAULT_API_KEY: &str = "fdb746ba-4802-46af-9f21-10ccd05a1b63";

/// Image shown for dishes without a usable image reference
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x200?text=No+Image";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Catalog endpoint URL
    pub endpoint: String,
    /// Access key appended to the endpoint, if any
    pub api_key: Option<String>,
    /// Local catalog file; takes precedence over `endpoint`
    pub catalog_file: Option<PathBuf>,
    pub placeholder_image: String,
    /// Currency label printed after prices
    pub currency: String,
    /// Where accepted orders are written as JSON
    pub order_output: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: Some(DEFAULT_API_KEY.to_string()),
            catalog_file: None,
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            currency: "₽".to_string(),
            order_output: None,
        }
    }
}

impl AppConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.catalog_file.is_none() {
            let endpoint = self.endpoint.trim();
            if endpoint.is_empty() {
                anyhow::bail!("Catalog endpoint must be specified");
            }
            if !endpoint.starts_with("https://") && !endpoint.starts_with("http://") {
                anyhow::bail!("Catalog endpoint must start with http:// or https://");
            }
        }

        if let Some(ref key) = self.api_key {
            if key.trim().is_empty() || key.chars().any(char::is_whitespace) {
                anyhow::bail!("API key must be non-empty and contain no whitespace");
            }
        }

        if self.currency.trim().is_empty() {
            anyhow::bail!("Currency label must not be empty");
        }

        Ok(())
    }

    /// Image reference to display for a dish
    pub fn image_for<'a>(&'a self, image: &'a str) -> &'a str {
        let image = image.trim();
        if image.starts_with("https://") || image.starts_with("http://") {
            image
        } else {
            &self.placeholder_image
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"{}").unwrap();
        temp_file.flush().unwrap();

        let loaded = AppConfig::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded, AppConfig::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lunchset.json");
        let config = AppConfig {
            currency: "RUB".to_string(),
            order_output: Some(PathBuf::from("/tmp/order.json")),
            ..Default::default()
        };

        config.save_to_file(&path).unwrap();
        assert_eq!(AppConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_load_nonexistent_file() {
        assert!(AppConfig::load_from_file("/nonexistent/lunchset.json").is_err());
    }

    #[test]
    fn test_load_invalid_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"{ invalid json }").unwrap();
        temp_file.flush().unwrap();
        assert!(AppConfig::load_from_file(temp_file.path()).is_err());
    }

    #[test]
    fn test_validation_endpoint_scheme() {
        let config = AppConfig {
            endpoint: "ftp://example.com/dishes".to_string(),
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("http://"));
    }

    #[test]
    fn test_catalog_file_skips_endpoint_check() {
        let config = AppConfig {
            endpoint: String::new(),
            catalog_file: Some(PathBuf::from("dishes.json")),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_api_key_whitespace() {
        let config = AppConfig {
            api_key: Some("abc def".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_image_placeholder_fallback() {
        let config = AppConfig::default();
        assert_eq!(config.image_for("https://cdn/x.jpg"), "https://cdn/x.jpg");
        assert_eq!(config.image_for(""), DEFAULT_PLACEHOLDER_IMAGE);
        assert_eq!(config.image_for("broken.jpg"), DEFAULT_PLACEHOLDER_IMAGE);
    }
}
