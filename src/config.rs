use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::compiler::{OptimizerSettings, SolcConfig, SolcSettings};
use crate::error::{ConfigError, ConfigResult};
use crate::manifest::BuildSource;
use crate::network::{NetworkConfig, NetworkId};

pub const DEFAULT_CONFIG_FILE: &str = "truss.json";

/// The project configuration record: plugins, deployment networks, solc
/// settings, and the static-asset build manifest. Loaded once per
/// invocation and read-only from then on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default)]
    pub plugins: Vec<String>,
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkConfig>,
    pub compilers: Compilers,
    #[serde(default)]
    pub build: BTreeMap<String, BuildSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Compilers {
    pub solc: SolcConfig,
}

impl ProjectConfig {
    pub fn from_json(raw: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        let config = Self::from_json(&raw)
            .with_context(|| format!("Failed to parse configuration from {}", path.display()))?;

        Ok(config)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(path, json)
            .with_context(|| format!("Failed to write configuration to {}", path.display()))?;

        Ok(())
    }

    /// Look up one deployment target by name.
    pub fn network(&self, name: &str) -> ConfigResult<&NetworkConfig> {
        self.networks
            .get(name)
            .ok_or_else(|| ConfigError::UnknownNetwork(name.to_string()))
    }

    /// Run the structural checks over every part of the record.
    pub fn validate(&self) -> ConfigResult<()> {
        for (name, network) in &self.networks {
            network.validate(name)?;
        }

        self.compilers.solc.validate()?;

        for (destination, source) in &self.build {
            source.validate(destination)?;
        }

        Ok(())
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        let mut networks = BTreeMap::new();
        networks.insert(
            "development".to_string(),
            NetworkConfig {
                host: "127.0.0.1".to_string(),
                port: 8545,
                network_id: NetworkId::Wildcard,
                gas: 5_000_000,
                gas_price: None,
            },
        );
        networks.insert(
            "ganache".to_string(),
            NetworkConfig {
                host: "127.0.0.1".to_string(),
                port: 8545,
                network_id: NetworkId::Wildcard,
                gas: 8_000_000,
                gas_price: Some(1_000_000_000),
            },
        );

        let mut build = BTreeMap::new();
        build.insert(
            "index.html".to_string(),
            BuildSource::Single("index.html".to_string()),
        );
        build.insert(
            "app.js".to_string(),
            BuildSource::Concat(vec!["javascripts/app.js".to_string()]),
        );
        build.insert(
            "app.css".to_string(),
            BuildSource::Concat(vec!["stylesheets/app.css".to_string()]),
        );

        Self {
            plugins: vec!["truffle-security".to_string()],
            networks,
            compilers: Compilers {
                solc: SolcConfig {
                    settings: SolcSettings {
                        optimizer: OptimizerSettings {
                            enabled: true,
                            runs: 200,
                        },
                    },
                    version: "0.5.11".to_string(),
                },
            },
            build,
        }
    }
}
