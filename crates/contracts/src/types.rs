//! Shared chain types used by the contract bindings

use bytes::Bytes;
use contract_abi::Address;
use std::fmt;

/// System contracts known to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractType {
    JustitiaRight = 1,
    Voting = 2,
    WhiteList = 3,
    MetaData = 4,
    DposBftVoting = 5,
    Msp = 6,
}

impl ContractType {
    /// Numeric id used by the meta-data contract
    pub fn id(&self) -> u64 {
        *self as u64
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::JustitiaRight => "JustitiaRight",
            Self::Voting => "Voting",
            Self::WhiteList => "WhiteList",
            Self::MetaData => "MetaData",
            Self::DposBftVoting => "DposBftVoting",
            Self::Msp => "Msp",
        };
        f.write_str(name)
    }
}

/// 32-byte block hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hash(pub [u8; 32]);

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Chain state a read-only call executes against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockRef {
    #[default]
    Latest,
    Height(u64),
    Hash(Hash),
}

impl fmt::Display for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str("latest"),
            Self::Height(h) => write!(f, "#{}", h),
            Self::Hash(h) => write!(f, "{}", h),
        }
    }
}

/// A contract transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub nonce: u64,
    pub from: Address,
    /// `None` for contract creation
    pub to: Option<Address>,
    pub payload: Bytes,
    pub amount: u128,
    pub gas_limit: u64,
    pub gas_price: u128,
}

impl Transaction {
    /// Create a transaction with no value transfer and an unlimited gas budget
    pub fn new(nonce: u64, from: Address, to: Address, payload: Bytes) -> Self {
        Self {
            nonce,
            from,
            to: Some(to),
            payload,
            amount: 0,
            gas_limit: u64::MAX,
            gas_price: 0,
        }
    }

    /// Create a read-only call from the zero address
    pub fn for_call(to: Address, payload: Bytes) -> Self {
        Self {
            nonce: 0,
            from: Address::ZERO,
            to: Some(to),
            payload,
            amount: 0,
            gas_limit: 0,
            gas_price: 0,
        }
    }

    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    pub fn with_from(mut self, from: Address) -> Self {
        self.from = from;
        self
    }
}
