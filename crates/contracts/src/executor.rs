//! Call execution seam
//!
//! The bindings never touch chain state directly. They build a transaction,
//! hand it to a [`CallExecutor`] and decode whatever comes back.

use crate::config::ContractsConfig;
use crate::error::{ContractError, Result};
use crate::registry::ContractRegistry;
use crate::types::{BlockRef, ContractType, Transaction};
use async_trait::async_trait;
use bytes::Bytes;
use contract_abi::{encode_with_selector, AbiContext, Address, ParamType, Value, SELECTOR_LEN};
use std::sync::Arc;
use tracing::trace;

/// Executes read-only contract calls against chain state
#[async_trait]
pub trait CallExecutor: Send + Sync {
    /// Run `tx` against the state at `block` and return the raw result
    async fn call(&self, tx: &Transaction, block: BlockRef) -> Result<Bytes>;

    /// Current nonce of `account` at `block`
    async fn account_nonce(&self, account: &Address, block: BlockRef) -> Result<u64>;
}

/// Prepend a method selector to the encoded arguments
pub fn build_payload(selector: [u8; SELECTOR_LEN], args: &[Value]) -> Result<Bytes> {
    Ok(encode_with_selector(selector, args)?)
}

/// Shared handle the bindings use to reach the chain
#[derive(Clone)]
pub struct ContractCaller {
    registry: ContractRegistry,
    executor: Arc<dyn CallExecutor>,
    config: ContractsConfig,
}

impl ContractCaller {
    pub fn new(registry: ContractRegistry, executor: Arc<dyn CallExecutor>, config: ContractsConfig) -> Self {
        Self { registry, executor, config }
    }

    pub fn registry(&self) -> &ContractRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ContractsConfig {
        &self.config
    }

    /// Decoder context for results
    pub fn abi_context(&self) -> AbiContext {
        self.config.abi_context()
    }

    /// Resolve a registered contract
    pub fn address_of(&self, contract: ContractType) -> Result<Address> {
        self.registry
            .lookup(contract)
            .ok_or(ContractError::NotRegistered(contract))
    }

    /// Execute `payload` against `contract` and return the raw result
    pub async fn call(&self, contract: Address, payload: Bytes, block: BlockRef) -> Result<Bytes> {
        let nonce = self.executor.account_nonce(&self.config.caller, block).await?;
        let tx = Transaction::for_call(contract, payload)
            .with_nonce(nonce)
            .with_from(self.config.caller);
        trace!("Calling {} at {} ({} byte payload)", contract, block, tx.payload.len());
        self.executor.call(&tx, block).await
    }

    /// Execute and decode the result as `types`
    pub async fn call_decode(
        &self,
        contract: Address,
        payload: Bytes,
        block: BlockRef,
        types: &[ParamType],
    ) -> Result<Vec<Value>> {
        let result = self.call(contract, payload, block).await?;
        Ok(self.abi_context().decode(&result, types)?)
    }
}

impl std::fmt::Debug for ContractCaller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractCaller")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockExecutor;
    use contract_abi::{encode, selector, Function};

    #[test]
    fn test_build_payload() {
        let sel = selector("initMembers(address[])");
        let payload = build_payload(sel, &[Value::AddressArray(vec![Address::ZERO])]).unwrap();
        assert_eq!(&payload[..4], &sel);
        assert_eq!(payload.len(), 4 + 3 * 32);

        let members = Function::parse("initMembers(address[])").unwrap();
        let args = [Value::AddressArray(vec![Address::ZERO])];
        assert_eq!(payload, members.encode_input(&args).unwrap());
    }

    #[tokio::test]
    async fn test_call_uses_configured_caller_and_nonce() {
        let contract: Address = "0x0a".parse().unwrap();
        let sender: Address = "0x0b".parse().unwrap();
        let mock = Arc::new(MockExecutor::new().with_nonce(41));
        let sel = [1, 2, 3, 4];
        mock.respond(contract, sel, encode(&[Value::Uint64(5)]).unwrap());

        let caller = ContractCaller::new(
            ContractRegistry::new(),
            mock.clone(),
            ContractsConfig::new().with_caller(sender),
        );
        let values = caller
            .call_decode(contract, Bytes::copy_from_slice(&sel), BlockRef::Height(3), &[ParamType::Uint64])
            .await
            .unwrap();
        assert_eq!(values, vec![Value::Uint64(5)]);

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0.nonce, 41);
        assert_eq!(calls[0].0.from, sender);
        assert_eq!(calls[0].0.to, Some(contract));
        assert_eq!(calls[0].1, BlockRef::Height(3));
    }

    #[test]
    fn test_unregistered_contract() {
        let caller = ContractCaller::new(
            ContractRegistry::new(),
            Arc::new(MockExecutor::new()),
            ContractsConfig::default(),
        );
        assert!(matches!(
            caller.address_of(ContractType::Msp),
            Err(ContractError::NotRegistered(ContractType::Msp))
        ));
    }
}
