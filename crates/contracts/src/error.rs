//! Error types for contract calls

use crate::types::ContractType;
use thiserror::Error;

/// Contract call errors
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("ABI error: {0}")]
    Abi(#[from] contract_abi::AbiError),

    #[error("contract not registered: {0}")]
    NotRegistered(ContractType),

    #[error("execution failed: {0}")]
    Execution(String),

    #[error("invalid node count {count}, only {available} nodes known")]
    InvalidNodeCount { count: u64, available: u64 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ContractError>;
