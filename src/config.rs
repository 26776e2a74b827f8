// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management

use crate::types::NetworkConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of environment overrides, e.g. `DAPPCANVAS_DATA_DIR`
pub const ENV_PREFIX: &str = "DAPPCANVAS";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the working blueprint and ghost overlay
    pub data_dir: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Network preset for new blueprints (arbitrum-sepolia, arbitrum-one, localhost)
    pub network: String,
    /// Pretty-print JSON exports
    pub pretty_export: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: directories::ProjectDirs::from("org", "hyperpolymath", "dappcanvas")
                .map(|d| d.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".dappcanvas")),
            log_level: "info".to_string(),
            network: "arbitrum-sepolia".to_string(),
            pretty_export: true,
        }
    }
}

impl Config {
    /// Network record for the configured preset
    pub fn network_config(&self) -> Result<NetworkConfig> {
        NetworkConfig::preset(&self.network).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown network preset: {}. Valid: arbitrum-sepolia, arbitrum-one, localhost",
                self.network
            )
        })
    }
}

/// Load configuration: defaults, then the optional TOML file, then environment
pub fn load(file: Option<&Path>) -> Result<Config> {
    let defaults = ::config::Config::try_from(&Config::default())
        .context("Failed to build default configuration")?;

    let mut builder = ::config::Config::builder().add_source(defaults);

    if let Some(path) = file {
        builder = builder.add_source(
            ::config::File::from(path.to_path_buf())
                .format(::config::FileFormat::Toml)
                .required(true),
        );
    }

    builder
        .add_source(::config::Environment::with_prefix(ENV_PREFIX))
        .build()
        .context("Failed to load configuration")?
        .try_deserialize()
        .context("Invalid configuration")
}

/// Render configuration as TOML
pub fn to_toml(config: &Config) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.network_config().unwrap().chain_id, 421_614);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("dappcanvas.toml");
        fs::write(&path, "network = \"arbitrum-one\"\npretty_export = false\n").unwrap();

        let config = load(Some(&path)).unwrap();
        assert_eq!(config.network, "arbitrum-one");
        assert!(!config.pretty_export);
        assert_eq!(config.network_config().unwrap().chain_id, 42_161);
    }

    #[test]
    fn test_unknown_network() {
        let config = Config {
            network: "solana".into(),
            ..Config::default()
        };
        assert!(config.network_config().is_err());
    }

    #[test]
    fn test_toml_rendering() {
        let text = to_toml(&Config::default()).unwrap();
        assert!(text.contains("log_level = \"info\""));
        assert!(text.contains("network = \"arbitrum-sepolia\""));
    }
}
