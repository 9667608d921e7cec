//! Configuration for fontpick itself (not the editor settings it edits).
//!
//! Loaded from an optional JSON file; command-line flags override it.

use crate::enumerate::runner::{DEFAULT_OUTPUT_LIMIT, DEFAULT_TIMEOUT};
use crate::settings::SettingKeys;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where and how fontpick reads and writes editor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Editor settings file holding the font keys
    pub settings_path: PathBuf,
    /// Key of the comma-separated font-family chain
    pub font_family_key: String,
    /// Key of the font weight token
    pub font_weight_key: String,
    /// Seconds the font listing command may run
    pub enumerate_timeout_secs: u64,
    /// Maximum bytes of font listing output
    pub output_limit_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let keys = SettingKeys::default();
        Self {
            settings_path: default_settings_path(),
            font_family_key: keys.font_family,
            font_weight_key: keys.font_weight,
            enumerate_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            output_limit_bytes: DEFAULT_OUTPUT_LIMIT,
        }
    }
}

/// `<config dir>/Code/User/settings.json`, or a relative fallback when the
/// platform has no config directory.
pub fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Code")
        .join("User")
        .join("settings.json")
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

    /// Load configuration from a JSON file. Missing fields take defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.font_family_key.trim().is_empty() {
            anyhow::bail!("Font family key must not be empty");
        }
        if self.font_weight_key.trim().is_empty() {
            anyhow::bail!("Font weight key must not be empty");
        }
        if self.font_family_key == self.font_weight_key {
            anyhow::bail!("Font family and font weight keys must differ");
        }
        if self.enumerate_timeout_secs == 0 {
            anyhow::bail!("Enumeration timeout must be at least one second");
        }
        if self.output_limit_bytes == 0 || self.output_limit_bytes > DEFAULT_OUTPUT_LIMIT {
            anyhow::bail!(
                "Output limit must be between 1 and {} bytes",
                DEFAULT_OUTPUT_LIMIT
            );
        }
        Ok(())
    }

    pub fn setting_keys(&self) -> SettingKeys {
        SettingKeys {
            font_family: self.font_family_key.clone(),
            font_weight: self.font_weight_key.clone(),
        }
    }

    pub fn enumerate_timeout(&self) -> Duration {
        Duration::from_secs(self.enumerate_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.settings_path.ends_with("Code/User/settings.json"));
        assert_eq!(config.setting_keys(), SettingKeys::default());
        assert_eq!(config.enumerate_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fontpick.json");
        fs::write(&path, r#"{"font_family_key": "terminal.integrated.fontFamily"}"#).unwrap();

        let config = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(config.font_family_key, "terminal.integrated.fontFamily");
        assert_eq!(config.font_weight_key, "editor.fontWeight");
        assert_eq!(config.output_limit_bytes, DEFAULT_OUTPUT_LIMIT);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fontpick.json");
        let config = AppConfig {
            settings_path: dir.path().join("settings.json"),
            enumerate_timeout_secs: 5,
            ..AppConfig::default()
        };
        config.save_to_file(&path).unwrap();
        assert_eq!(AppConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            AppConfig {
                font_family_key: " ".into(),
                ..AppConfig::default()
            },
            AppConfig {
                font_weight_key: "editor.fontFamily".into(),
                ..AppConfig::default()
            },
            AppConfig {
                enumerate_timeout_secs: 0,
                ..AppConfig::default()
            },
            AppConfig {
                output_limit_bytes: DEFAULT_OUTPUT_LIMIT + 1,
                ..AppConfig::default()
            },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{:?} should be rejected", config);
        }
    }

    #[test]
    fn test_load_missing_file_fails_with_context() {
        let err = AppConfig::load_from_file("/nonexistent/fontpick.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read configuration"));
    }
}
