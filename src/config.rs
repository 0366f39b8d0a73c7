//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application
//! configuration in TOML format with platform-specific directory resolution.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Simulator settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Tapping term in milliseconds: the window within which consecutive
    /// taps of a tap-dance key count as one gesture.
    pub tapping_term_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        // QMK's default TAPPING_TERM.
        Self {
            tapping_term_ms: 200,
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory generated documents and firmware sources are written to.
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        let output_dir = Config::config_dir()
            .map(|dir| dir.join("exports"))
            .unwrap_or_else(|_| PathBuf::from("."));
        Self { output_dir }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Simulator settings
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Gets the platform configuration directory for padmap.
    ///
    /// - Linux: `~/.config/padmap/`
    /// - macOS: `~/Library/Application Support/padmap/`
    /// - Windows: `%APPDATA%\padmap\`
    pub fn config_dir() -> Result<PathBuf> {
        let base = dirs::config_dir().context("Could not determine config directory")?;
        Ok(base.join("padmap"))
    }

    /// Path to the configuration file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Checks whether a configuration file exists.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path().map(|p| p.exists()).unwrap_or(false)
    }

    /// Loads the configuration, falling back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to the platform config directory.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir: {}", parent.display()))?;
        }
        self.save_to(&path)
    }

    /// Saves configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.simulation.tapping_term_ms == 0 {
            bail!("simulation.tapping_term_ms must be greater than zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.simulation.tapping_term_ms, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.simulation.tapping_term_ms = 175;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[simulation]\ntapping_term_ms = 150\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.simulation.tapping_term_ms, 150);
        assert_eq!(loaded.export, ExportConfig::default());
    }

    #[test]
    fn test_zero_tapping_term_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[simulation]\ntapping_term_ms = 0\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
