//! Contract binding configuration

use crate::error::Result;
use contract_abi::{AbiContext, Address};
use serde::{Deserialize, Serialize};

/// Default meta-data contract address
pub const DEFAULT_META_DATA_ADDRESS: Address = Address([
    0x8b, 0xe5, 0x03, 0xbc, 0xde, 0xd9, 0x0e, 0xd4, 0x2e, 0xff, 0x31, 0xf5, 0x61, 0x99, 0x39, 0x9b,
    0x2b, 0x01, 0x54, 0xca,
]);

/// Address substituted when the meta-data lookup fails
pub const DEFAULT_CONTRACT_ADDRESS: Address = Address([
    0xbd, 0x77, 0x04, 0x16, 0xa3, 0x34, 0x5f, 0x91, 0xe4, 0xb3, 0x45, 0x76, 0xcb, 0x80, 0x4a, 0x57,
    0x6f, 0xa4, 0x8e, 0xb1,
]);

/// Node count reported when the voting contract cannot be read
pub const DEFAULT_FALLBACK_NODE_NUMBER: u64 = 4;

/// Configuration shared by the contract bindings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContractsConfig {
    /// Decode out-of-range string offsets as address text
    pub legacy_address_text: bool,
    pub meta_data_address: Address,
    pub default_contract_address: Address,
    pub fallback_node_number: u64,
    /// Sender of read-only calls
    pub caller: Address,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            legacy_address_text: false,
            meta_data_address: DEFAULT_META_DATA_ADDRESS,
            default_contract_address: DEFAULT_CONTRACT_ADDRESS,
            fallback_node_number: DEFAULT_FALLBACK_NODE_NUMBER,
            caller: Address::ZERO,
        }
    }
}

impl ContractsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_legacy_address_text(mut self, enabled: bool) -> Self {
        self.legacy_address_text = enabled;
        self
    }

    pub fn with_meta_data_address(mut self, address: Address) -> Self {
        self.meta_data_address = address;
        self
    }

    pub fn with_default_contract_address(mut self, address: Address) -> Self {
        self.default_contract_address = address;
        self
    }

    pub fn with_fallback_node_number(mut self, count: u64) -> Self {
        self.fallback_node_number = count;
        self
    }

    pub fn with_caller(mut self, caller: Address) -> Self {
        self.caller = caller;
        self
    }

    /// Decoder context for call results
    pub fn abi_context(&self) -> AbiContext {
        AbiContext::with_legacy_address_text(self.legacy_address_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_addresses() {
        let config = ContractsConfig::default();
        assert_eq!(
            config.meta_data_address.to_string(),
            "0x8be503bcded90ed42eff31f56199399b2b0154ca"
        );
        assert_eq!(
            config.default_contract_address.to_string(),
            "0xbd770416a3345f91e4b34576cb804a576fa48eb1"
        );
        assert_eq!(config.fallback_node_number, 4);
        assert!(!config.abi_context().legacy_address_text);
    }

    #[test]
    fn test_from_json_partial() {
        let config = ContractsConfig::from_json(
            r#"{"legacyAddressText": true, "fallbackNodeNumber": 7}"#,
        )
        .unwrap();
        assert!(config.legacy_address_text);
        assert_eq!(config.fallback_node_number, 7);
        assert_eq!(config.meta_data_address, DEFAULT_META_DATA_ADDRESS);
        assert!(config.abi_context().legacy_address_text);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(ContractsConfig::from_json(r#"{"caller": "0xnothex"}"#).is_err());
    }

    #[test]
    fn test_builder() {
        let caller: Address = "0x05".parse().unwrap();
        let config = ContractsConfig::new()
            .with_caller(caller)
            .with_fallback_node_number(1);
        assert_eq!(config.caller, caller);
        assert_eq!(config.fallback_node_number, 1);
    }
}
