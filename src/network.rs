use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ConfigError, ConfigResult};

/// Connection parameters for one deployment target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkConfig {
    pub host: String,
    pub port: u16,
    pub network_id: NetworkId,
    pub gas: u64,
    #[serde(rename = "gasPrice", default, skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<u64>,
}

/// A network id is either the wildcard `*` (match any chain) or a numeric
/// id string. Serialized as a plain string either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkId {
    Wildcard,
    Id(String),
}

impl NetworkId {
    pub fn as_str(&self) -> &str {
        match self {
            NetworkId::Wildcard => "*",
            NetworkId::Id(id) => id,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, NetworkId::Wildcard)
    }
}

impl From<&str> for NetworkId {
    fn from(raw: &str) -> Self {
        if raw == "*" {
            NetworkId::Wildcard
        } else {
            NetworkId::Id(raw.to_string())
        }
    }
}

impl Serialize for NetworkId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NetworkId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(NetworkId::from(raw.as_str()))
    }
}

impl NetworkConfig {
    /// The `host:port` pair this descriptor points at.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn validate(&self, name: &str) -> ConfigResult<()> {
        if self.host.is_empty() {
            return Err(ConfigError::MissingField(format!(
                "host for network '{}'",
                name
            )));
        }

        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: format!("networks.{}.port", name),
                message: "port must be a positive integer".to_string(),
            });
        }

        if let NetworkId::Id(id) = &self.network_id {
            if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
                return Err(ConfigError::InvalidValue {
                    field: format!("networks.{}.network_id", name),
                    message: format!("expected a numeric id or '*', got '{}'", id),
                });
            }
        }

        if self.gas == 0 {
            return Err(ConfigError::InvalidValue {
                field: format!("networks.{}.gas", name),
                message: "gas limit must be positive".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn development() -> NetworkConfig {
        NetworkConfig {
            host: "127.0.0.1".to_string(),
            port: 8545,
            network_id: NetworkId::Wildcard,
            gas: 5_000_000,
            gas_price: None,
        }
    }

    #[test]
    fn test_parse_descriptor_with_gas_price() {
        let json = r#"{
            "host": "127.0.0.1",
            "port": 8545,
            "network_id": "*",
            "gas": 8000000,
            "gasPrice": 1000000000
        }"#;

        let network: NetworkConfig = serde_json::from_str(json).unwrap();
        assert_eq!(network.endpoint(), "127.0.0.1:8545");
        assert!(network.network_id.is_wildcard());
        assert_eq!(network.gas, 8_000_000);
        assert_eq!(network.gas_price, Some(1_000_000_000));
    }

    #[test]
    fn test_gas_price_is_optional() {
        let json = r#"{"host": "127.0.0.1", "port": 8545, "network_id": "1", "gas": 5000000}"#;

        let network: NetworkConfig = serde_json::from_str(json).unwrap();
        assert_eq!(network.gas_price, None);
        assert_eq!(network.network_id, NetworkId::Id("1".to_string()));
    }

    #[test]
    fn test_network_id_round_trips_as_string() {
        let wildcard = serde_json::to_string(&NetworkId::Wildcard).unwrap();
        assert_eq!(wildcard, "\"*\"");

        let id: NetworkId = serde_json::from_str("\"5777\"").unwrap();
        assert_eq!(id, NetworkId::Id("5777".to_string()));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"5777\"");
    }

    #[test]
    fn test_validate_accepts_development() {
        development().validate("development").unwrap();
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut network = development();
        network.port = 0;

        let err = network.validate("development").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_validate_rejects_empty_host() {
        let mut network = development();
        network.host = String::new();

        assert!(matches!(
            network.validate("development").unwrap_err(),
            ConfigError::MissingField(_)
        ));
    }

    #[test]
    fn test_validate_rejects_non_numeric_id() {
        let mut network = development();
        network.network_id = NetworkId::from("mainnet");

        let err = network.validate("development").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_unknown_descriptor_field_is_rejected() {
        let json = r#"{"host": "127.0.0.1", "port": 8545, "network_id": "*", "gas": 1, "from": "0x0"}"#;

        assert!(serde_json::from_str::<NetworkConfig>(json).is_err());
    }
}
