//! Justitia voting contract: node count and ranked candidates

use crate::error::{ContractError, Result};
use crate::executor::{build_payload, ContractCaller};
use crate::types::{BlockRef, ContractType};
use contract_abi::{Address, ParamType, Value};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::warn;

/// `totalNodes()`
pub const TOTAL_NODES: [u8; 4] = [0x95, 0x92, 0xd4, 0x24];

/// `GetCandidateByRanking(uint64)`
pub const CANDIDATE_BY_RANKING: [u8; 4] = [0xae, 0x33, 0x64, 0xa4];

/// Upper bound on the node list preallocation; the count comes from chain state
const NODE_LIST_PREALLOC: u64 = 64;

/// A ranked candidate node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub address: Address,
    pub url: String,
    pub id: u64,
}

/// Binding for the voting contract
///
/// Remembers the last node count it read so that [`node_list`] can
/// reject requests for more nodes than exist.
///
/// [`node_list`]: VotingContract::node_list
#[derive(Debug, Clone)]
pub struct VotingContract {
    caller: ContractCaller,
    node_number: Arc<AtomicU64>,
}

impl VotingContract {
    pub fn new(caller: ContractCaller) -> Self {
        Self {
            caller,
            node_number: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Number of nodes, falling back to the configured count on failure
    pub async fn node_number(&self) -> u64 {
        match self.try_node_number().await {
            Ok(count) => {
                self.node_number.store(count, Ordering::SeqCst);
                count
            }
            Err(e) => {
                let fallback = self.caller.config().fallback_node_number;
                warn!("Failed to read node number, assuming {}: {}", fallback, e);
                fallback
            }
        }
    }

    async fn try_node_number(&self) -> Result<u64> {
        let contract = self.caller.address_of(ContractType::Voting)?;
        let payload = build_payload(TOTAL_NODES, &[])?;
        let values = self
            .caller
            .call_decode(contract, payload, BlockRef::Latest, &[ParamType::Uint64])
            .await?;
        Ok(values.first().and_then(Value::as_u64).unwrap_or_default())
    }

    /// Last node count read by [`node_number`](Self::node_number)
    pub fn cached_node_number(&self) -> u64 {
        self.node_number.load(Ordering::SeqCst)
    }

    /// The `count` highest ranked candidates
    pub async fn node_list(&self, count: u64) -> Result<Vec<NodeInfo>> {
        let available = self.cached_node_number();
        if count > available {
            return Err(ContractError::InvalidNodeCount { count, available });
        }

        let contract = self.caller.address_of(ContractType::Voting)?;
        let capacity = usize::try_from(count.min(NODE_LIST_PREALLOC)).unwrap_or_default();
        let mut nodes = Vec::with_capacity(capacity);
        for rank in 0..count {
            let payload = build_payload(CANDIDATE_BY_RANKING, &[Value::Uint64(rank)])?;
            let result = self.caller.call(contract, payload, BlockRef::Latest).await?;

            let mut node = NodeInfo {
                address: Address::ZERO,
                url: String::new(),
                id: 0,
            };
            self.caller
                .abi_context()
                .decode_into(&result, &mut [&mut node.address, &mut node.url, &mut node.id])?;
            nodes.push(node);
        }
        Ok(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContractsConfig;
    use crate::mock::MockExecutor;
    use crate::registry::ContractRegistry;
    use contract_abi::encode;

    fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    fn setup(register: bool) -> (Arc<MockExecutor>, VotingContract, Address) {
        let contract = addr("0x5a443704dd4b594b382c22a083e2bd3090a6fef3");
        let registry = ContractRegistry::new();
        if register {
            registry.register(ContractType::Voting, contract);
        }
        let mock = Arc::new(MockExecutor::new());
        let caller = ContractCaller::new(registry, mock.clone(), ContractsConfig::default());
        (mock, VotingContract::new(caller), contract)
    }

    fn candidate(mock: &MockExecutor, contract: Address, rank: u64, node: &NodeInfo) {
        let call = build_payload(CANDIDATE_BY_RANKING, &[Value::Uint64(rank)]).unwrap();
        let result = encode(&[
            node.address.into(),
            node.url.as_str().into(),
            node.id.into(),
        ])
        .unwrap();
        mock.respond_exact(contract, &call, result);
    }

    #[tokio::test]
    async fn test_node_number_fallback() {
        let (_mock, voting, _) = setup(false);
        assert_eq!(voting.node_number().await, 4);
        assert_eq!(voting.cached_node_number(), 0);
    }

    #[tokio::test]
    async fn test_node_list() {
        let (mock, voting, contract) = setup(true);
        mock.respond(contract, TOTAL_NODES, encode(&[2u64.into()]).unwrap());
        let nodes = vec![
            NodeInfo {
                address: addr("0x0a"),
                url: "tcp://192.168.1.1:8080".into(),
                id: 7,
            },
            NodeInfo {
                address: addr("0x0b"),
                url: "tcp://192.168.1.2:8080".into(),
                id: 9,
            },
        ];
        for (rank, node) in nodes.iter().enumerate() {
            candidate(&mock, contract, rank as u64, node);
        }

        assert_eq!(voting.node_number().await, 2);
        assert_eq!(voting.node_list(2).await.unwrap(), nodes);
        assert_eq!(voting.node_list(1).await.unwrap(), nodes[..1].to_vec());
    }

    #[tokio::test]
    async fn test_node_list_rejects_large_count() {
        let (mock, voting, contract) = setup(true);
        mock.respond(contract, TOTAL_NODES, encode(&[1u64.into()]).unwrap());
        voting.node_number().await;
        assert!(matches!(
            voting.node_list(3).await,
            Err(ContractError::InvalidNodeCount { count: 3, available: 1 })
        ));
    }

    #[tokio::test]
    async fn test_node_list_huge_count_fails_on_call() {
        let (mock, voting, contract) = setup(true);
        mock.respond(contract, TOTAL_NODES, encode(&[u64::MAX.into()]).unwrap());
        assert_eq!(voting.node_number().await, u64::MAX);

        assert!(matches!(
            voting.node_list(u64::MAX).await,
            Err(ContractError::Execution(_))
        ));
        assert_eq!(mock.calls().len(), 2);
    }
}
