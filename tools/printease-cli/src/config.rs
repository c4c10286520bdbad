//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use printease_commerce::CommerceSettings;
use serde::{Deserialize, Serialize};

/// Config file names, in lookup order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["printease.toml", ".printease.toml", "printease.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where the storefront keeps its state.
    #[serde(default)]
    pub store: StoreConfig,

    /// Cart, checkout and form settings.
    #[serde(default)]
    pub commerce: CommerceSettings,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?
        };

        config
            .commerce
            .validate()
            .with_context(|| format!("Invalid [commerce] settings in {}", path.display()))?;
        Ok(config)
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Store location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding one JSON file per key. Relative paths resolve
    /// against the config file's directory.
    #[serde(default = "default_store_dir")]
    pub dir: String,
}

fn default_store_dir() -> String {
    ".printease".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
        }
    }
}

/// Generate a default printease.toml config file.
pub fn generate_default_config() -> String {
    r#"# PrintEase storefront configuration

[store]
# Directory for persisted state, relative to this file.
dir = ".printease"

[commerce]
storage_key = "printease_cart"
currency = "PHP"
# Flat shipping fee in centavos, charged once per non-empty order.
shipping_fee_cents = 5000
notification_dismiss_ms = 3000
redirect_delay_ms = 3000
submission_latency_ms = 0
require_customer_details = true
form_latency_ms = 1500
max_design_file_bytes = 5242880
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_matches_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.store.dir, ".printease");
        assert_eq!(config.commerce, CommerceSettings::default());
    }

    #[test]
    fn test_empty_file_is_valid() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.commerce.storage_key, "printease_cart");
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("printease.json");

        let mut config = CliConfig::default();
        config.commerce.shipping_fee_cents = 0;
        config.save(&path).unwrap();

        let loaded = CliConfig::load(&path).unwrap();
        assert_eq!(loaded.commerce.shipping_fee_cents, 0);
    }

    #[test]
    fn test_load_rejects_bad_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("printease.toml");
        std::fs::write(&path, "[commerce]\nshipping_fee_cents = -100\n").unwrap();

        assert!(CliConfig::load(&path).is_err());
    }
}
