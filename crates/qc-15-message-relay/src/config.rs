//! Relay configuration with validation.
//!
//! Loaded from environment variables or a JSON document.

use crate::domain::Address;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required address is zero.
    #[error("{0} address must not be zero")]
    ZeroAddress(&'static str),

    /// Address could not be parsed.
    #[error("invalid address in {field}: {reason}")]
    InvalidAddress {
        /// Field or variable name.
        field: String,
        /// Parse failure.
        reason: String,
    },

    /// Required variable missing.
    #[error("missing environment variable {0}")]
    Missing(String),

    /// JSON document could not be parsed.
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Relay configuration.
///
/// Addresses are hex strings in JSON, with or without `0x`. Envelope
/// execution hints are fixed and not configurable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// The relay's own account on the ledgers.
    #[serde(with = "hex_address")]
    pub relay: Address,
    /// Initial principal.
    #[serde(with = "hex_address")]
    pub owner: Address,
    /// Router trusted for inbound delivery and used for outbound sends.
    #[serde(with = "hex_address")]
    pub router: Address,
    /// Token the router fee is paid in.
    #[serde(with = "hex_address")]
    pub fee_token: Address,
}

impl RelayConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("relay", &self.relay),
            ("owner", &self.owner),
            ("router", &self.router),
            ("fee_token", &self.fee_token),
        ];
        for (name, address) in required {
            if *address == [0u8; 20] {
                return Err(ConfigError::ZeroAddress(name));
            }
        }

        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC_RELAY_ADDRESS`: relay account (hex, required)
    /// - `QC_RELAY_OWNER`: initial principal (hex, required)
    /// - `QC_RELAY_ROUTER`: trusted router (hex, required)
    /// - `QC_RELAY_FEE_TOKEN`: fee token (hex, required)
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            relay: env_address("QC_RELAY_ADDRESS")?,
            owner: env_address("QC_RELAY_OWNER")?,
            router: env_address("QC_RELAY_ROUTER")?,
            fee_token: env_address("QC_RELAY_FEE_TOKEN")?,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Parse a 20-byte hex address, with or without `0x`.
pub fn parse_address(field: &str, value: &str) -> Result<Address, ConfigError> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(digits).map_err(|e| ConfigError::InvalidAddress {
        field: field.to_string(),
        reason: e.to_string(),
    })?;

    bytes
        .try_into()
        .map_err(|b: Vec<u8>| ConfigError::InvalidAddress {
            field: field.to_string(),
            reason: format!("expected 20 bytes, got {}", b.len()),
        })
}

fn env_address(var: &str) -> Result<Address, ConfigError> {
    let value = env::var(var).map_err(|_| ConfigError::Missing(var.to_string()))?;
    parse_address(var, &value)
}

// Serialize addresses as `0x`-prefixed hex strings.
mod hex_address {
    use super::parse_address;
    use crate::domain::Address;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(address: &Address, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(address)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Address, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_address("address", &s).map_err(serde::de::Error::custom)
    }
}
