use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// The `compilers.solc` block: which solc to use and how hard to optimize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolcConfig {
    pub settings: SolcSettings,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolcSettings {
    pub optimizer: OptimizerSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptimizerSettings {
    pub enabled: bool,
    pub runs: u32,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        // solc's own defaults: optimizer off, tuned for 200 runs when on.
        Self {
            enabled: false,
            runs: 200,
        }
    }
}

impl SolcConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if !is_semver_like(&self.version) {
            return Err(ConfigError::InvalidValue {
                field: "compilers.solc.version".to_string(),
                message: format!(
                    "expected a MAJOR.MINOR.PATCH version, got '{}'",
                    self.version
                ),
            });
        }

        Ok(())
    }
}

/// Accepts exactly three dot-separated numeric components, e.g. `0.5.11`.
fn is_semver_like(version: &str) -> bool {
    let parts: Vec<&str> = version.split('.').collect();

    parts.len() == 3
        && parts
            .iter()
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
}
