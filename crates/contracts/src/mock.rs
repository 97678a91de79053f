//! In-memory call executor for tests

use crate::error::{ContractError, Result};
use crate::executor::CallExecutor;
use crate::types::{BlockRef, Transaction};
use async_trait::async_trait;
use bytes::Bytes;
use contract_abi::Address;
use std::collections::HashMap;
use std::sync::Mutex;

/// Answers calls from a table keyed by contract address and selector
#[derive(Debug, Default)]
pub struct MockExecutor {
    responses: Mutex<HashMap<(Address, Vec<u8>), Bytes>>,
    calls: Mutex<Vec<(Transaction, BlockRef)>>,
    nonce: u64,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    /// Return `result` for any call to `contract` starting with `selector`
    pub fn respond(&self, contract: Address, selector: [u8; 4], result: Bytes) {
        self.respond_exact(contract, &selector, result);
    }

    /// Return `result` for calls to `contract` whose payload starts with `prefix`
    ///
    /// The longest matching prefix wins.
    pub fn respond_exact(&self, contract: Address, prefix: &[u8], result: Bytes) {
        self.responses
            .lock()
            .unwrap()
            .insert((contract, prefix.to_vec()), result);
    }

    pub fn calls(&self) -> Vec<(Transaction, BlockRef)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CallExecutor for MockExecutor {
    async fn call(&self, tx: &Transaction, block: BlockRef) -> Result<Bytes> {
        self.calls.lock().unwrap().push((tx.clone(), block));
        let to = tx
            .to
            .ok_or_else(|| ContractError::Execution("missing recipient".into()))?;
        let responses = self.responses.lock().unwrap();
        responses
            .iter()
            .filter(|((addr, prefix), _)| *addr == to && tx.payload.starts_with(prefix))
            .max_by_key(|((_, prefix), _)| prefix.len())
            .map(|(_, result)| result.clone())
            .ok_or_else(|| ContractError::Execution("execution reverted".into()))
    }

    async fn account_nonce(&self, _account: &Address, _block: BlockRef) -> Result<u64> {
        Ok(self.nonce)
    }
}
