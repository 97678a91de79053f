//! Contract address registry
//!
//! Maps each system contract to its deployed address. The registry is
//! filled once at startup and then read from many tasks; clones share the
//! same table.

use crate::types::ContractType;
use contract_abi::Address;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Shared contract address table
#[derive(Debug, Clone, Default)]
pub struct ContractRegistry {
    entries: Arc<RwLock<HashMap<ContractType, Address>>>,
}

impl ContractRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an address, replacing and returning any previous one
    pub fn register(&self, contract: ContractType, address: Address) -> Option<Address> {
        debug!("Registry: {} -> {}", contract, address);
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(contract, address)
    }

    /// Look up the address of a contract
    pub fn lookup(&self, contract: ContractType) -> Option<Address> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(&contract).copied()
    }

    /// Remove a contract, returning its address
    pub fn remove(&self, contract: ContractType) -> Option<Address> {
        debug!("Registry: removing {}", contract);
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.remove(&contract)
    }

    pub fn contains(&self, contract: ContractType) -> bool {
        self.lookup(contract).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
