//! Factory configuration
//!
//! The factory identity is the only input the derivations depend on; every
//! predicted address changes with it.

use serde::{Deserialize, Serialize};
use types::ids::Address;

use crate::errors::ConfigError;

/// Construction parameters for `XTokenFactory`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryConfig {
    /// Address of the factory itself
    pub address: Address,
}

impl FactoryConfig {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Parse from JSON, e.g. `{"address": "0x…"}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let json = format!("{{\"address\": \"0x{}\"}}", "fa".repeat(20));
        let config = FactoryConfig::from_json(&json).unwrap();
        assert_eq!(config.address, Address::repeat_byte(0xfa));
    }

    #[test]
    fn test_from_json_bad_address() {
        let result = FactoryConfig::from_json("{\"address\": \"0x12\"}");
        assert!(matches!(result, Err(ConfigError::Malformed(_))));
    }

    #[test]
    fn test_from_json_missing_field() {
        assert!(FactoryConfig::from_json("{}").is_err());
    }
}
