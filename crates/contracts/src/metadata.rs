//! Meta-data contract: the on-chain directory of system contracts

use crate::error::Result;
use crate::executor::{build_payload, ContractCaller};
use crate::registry::ContractRegistry;
use crate::types::{BlockRef, ContractType};
use contract_abi::{Address, ParamType, Value};
use tracing::{debug, warn};

/// `GetContractById(uint64)`
pub const GET_CONTRACT_BY_ID: [u8; 4] = [0x8b, 0xa9, 0xac, 0x6f];

/// Binding for the meta-data contract
#[derive(Debug, Clone)]
pub struct MetaDataContract {
    caller: ContractCaller,
}

impl MetaDataContract {
    pub fn new(caller: ContractCaller) -> Self {
        Self { caller }
    }

    /// Deployed address of `contract`
    ///
    /// Falls back to the configured default address when the lookup fails.
    pub async fn contract_by_id(&self, contract: ContractType) -> Address {
        match self.try_contract_by_id(contract).await {
            Ok(address) => address,
            Err(e) => {
                let fallback = self.caller.config().default_contract_address;
                warn!("Failed to look up {} address, using {}: {}", contract, fallback, e);
                fallback
            }
        }
    }

    async fn try_contract_by_id(&self, contract: ContractType) -> Result<Address> {
        let payload = build_payload(GET_CONTRACT_BY_ID, &[Value::Uint64(contract.id())])?;
        let meta_data = self.caller.config().meta_data_address;
        let values = self
            .caller
            .call_decode(meta_data, payload, BlockRef::Latest, &[ParamType::Address])
            .await?;
        Ok(values
            .first()
            .and_then(Value::as_address)
            .unwrap_or_default())
    }

    /// Resolve each contract and record it in `registry`
    pub async fn populate(&self, registry: &ContractRegistry, contracts: &[ContractType]) {
        for contract in contracts {
            let address = self.contract_by_id(*contract).await;
            debug!("Resolved {} to {}", contract, address);
            registry.register(*contract, address);
        }
    }
}
