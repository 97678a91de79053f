//! System contract bindings
//!
//! Builds call payloads for the chain's system contracts with
//! [`contract_abi`] and reads their results back.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Bindings: DposContract, MspContract, MetaDataContract,  │
//! │            VotingContract                                │
//! ├──────────────────────────────────────────────────────────┤
//! │  ContractCaller  ── ContractRegistry (type -> address)   │
//! │                  ── CallExecutor (chain state, async)    │
//! ├──────────────────────────────────────────────────────────┤
//! │  contract_abi: selector ++ encode / decode               │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Read paths that the node treats as optional (member lists, URLs,
//! authorization) log a warning and return a safe default instead of
//! failing. Initialization builders and timer reads return errors.

pub mod config;
pub mod dpos;
pub mod error;
pub mod executor;
pub mod metadata;
pub mod msp;
pub mod registry;
pub mod types;
pub mod voting;

#[cfg(test)]
mod mock;

pub use config::ContractsConfig;
pub use dpos::{ConsensusConf, ConsensusMember, DposContract};
pub use error::{ContractError, Result};
pub use executor::{build_payload, CallExecutor, ContractCaller};
pub use metadata::MetaDataContract;
pub use msp::{MspAction, MspContract};
pub use registry::ContractRegistry;
pub use types::{BlockRef, ContractType, Hash, Transaction};
pub use voting::{NodeInfo, VotingContract};
