//! DPoS-BFT consensus contract
//!
//! Builds the transactions that seed consensus membership at genesis and
//! reads the member list, member URLs and consensus timers back.
//!
//! Initialization order, one transaction each with consecutive nonces:
//! ```text
//! initMembers(address[])
//! initMemberUrl(address,string)        # once per member
//! initConsensusTimer(uint64,uint64,uint64,uint64)
//! ```

use crate::error::Result;
use crate::executor::{build_payload, ContractCaller};
use crate::types::{BlockRef, ContractType, Transaction};
use bytes::Bytes;
use contract_abi::{selector, Address, ParamType, Value};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const INIT_MEMBERS: &str = "initMembers(address[])";
const INIT_CONSENSUS_TIMER: &str = "initConsensusTimer(uint64,uint64,uint64,uint64)";
const INIT_MEMBER_URL: &str = "initMemberUrl(address,string)";
const GET_MEMBERS: &str = "getMembers()";
const GET_MEMBER_URL: &str = "getMemberUrl(address)";
const GET_CONSENSUS_TIMER: &str = "getConsensusTimer()";

/// A consensus member and the URL peers reach it on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusMember {
    pub addr: Address,
    pub url: String,
}

impl ConsensusMember {
    pub fn new(addr: Address, url: impl Into<String>) -> Self {
        Self { addr, url: url.into() }
    }
}

/// Consensus timing parameters, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConsensusConf {
    #[serde(rename = "blockDelay")]
    pub block_delay: u64,
    #[serde(rename = "idleTimeOut")]
    pub idle_timeout: u64,
    #[serde(rename = "commitTimeOut")]
    pub commit_timeout: u64,
    #[serde(rename = "viewChangeTimeOut")]
    pub view_change_timeout: u64,
}

/// Binding for the DPoS-BFT voting contract
#[derive(Debug, Clone)]
pub struct DposContract {
    caller: ContractCaller,
}

impl DposContract {
    pub fn new(caller: ContractCaller) -> Self {
        Self { caller }
    }

    /// Build the genesis transactions that seed members, URLs and timers
    pub fn init_transactions(
        nonce: u64,
        caller: Address,
        contract: Address,
        members: &[ConsensusMember],
        conf: &ConsensusConf,
    ) -> Result<Vec<Transaction>> {
        let mut txs = Vec::with_capacity(members.len() + 2);
        let mut nonce = nonce;

        let addrs: Vec<Address> = members.iter().map(|m| m.addr).collect();
        let payload = build_payload(selector(INIT_MEMBERS), &[Value::AddressArray(addrs)])?;
        txs.push(Transaction::new(nonce, caller, contract, payload));
        nonce += 1;

        for member in members {
            let payload = build_payload(
                selector(INIT_MEMBER_URL),
                &[Value::Address(member.addr), Value::String(member.url.clone())],
            )?;
            txs.push(Transaction::new(nonce, caller, contract, payload));
            nonce += 1;
        }

        let payload = build_payload(
            selector(INIT_CONSENSUS_TIMER),
            &[
                Value::Uint64(conf.block_delay),
                Value::Uint64(conf.idle_timeout),
                Value::Uint64(conf.commit_timeout),
                Value::Uint64(conf.view_change_timeout),
            ],
        )?;
        txs.push(Transaction::new(nonce, caller, contract, payload));

        debug!("Built {} DPoS init transactions for {} members", txs.len(), members.len());
        Ok(txs)
    }

    /// Current members, without empty slots
    ///
    /// Returns an empty list when the contract cannot be read.
    pub async fn members(&self, block: BlockRef) -> Vec<Address> {
        match self.try_members(block).await {
            Ok(members) => members,
            Err(e) => {
                warn!("Failed to read DPoS members at {}: {}", block, e);
                Vec::new()
            }
        }
    }

    async fn try_members(&self, block: BlockRef) -> Result<Vec<Address>> {
        let contract = self.caller.address_of(ContractType::DposBftVoting)?;
        let payload = Bytes::copy_from_slice(&selector(GET_MEMBERS));
        let values = self
            .caller
            .call_decode(contract, payload, block, &[ParamType::AddressArray])
            .await?;
        let members = match values.into_iter().next() {
            Some(Value::AddressArray(addrs)) => addrs,
            _ => Vec::new(),
        };
        Ok(members.into_iter().filter(|a| !a.is_zero()).collect())
    }

    /// URL registered for `member`, or an empty string when unavailable
    pub async fn member_url(&self, block: BlockRef, member: Address) -> String {
        match self.try_member_url(block, member).await {
            Ok(url) => url,
            Err(e) => {
                warn!("Failed to read URL of {} at {}: {}", member, block, e);
                String::new()
            }
        }
    }

    async fn try_member_url(&self, block: BlockRef, member: Address) -> Result<String> {
        let contract = self.caller.address_of(ContractType::DposBftVoting)?;
        let payload = build_payload(selector(GET_MEMBER_URL), &[Value::Address(member)])?;
        let values = self
            .caller
            .call_decode(contract, payload, block, &[ParamType::String])
            .await?;
        match values.into_iter().next() {
            Some(Value::String(url)) => Ok(url),
            _ => Ok(String::new()),
        }
    }

    /// Members and how many of them may be faulty, `(n - 1) / 3`
    pub async fn members_and_fault_tolerance(&self, block: BlockRef) -> (Vec<Address>, usize) {
        let members = self.members(block).await;
        let tolerance = members.len().saturating_sub(1) / 3;
        (members, tolerance)
    }

    /// Consensus timers stored in the contract
    pub async fn consensus_timer(&self, block: BlockRef) -> Result<ConsensusConf> {
        let contract = self.caller.address_of(ContractType::DposBftVoting)?;
        let payload = Bytes::copy_from_slice(&selector(GET_CONSENSUS_TIMER));
        let result = self.caller.call(contract, payload, block).await?;

        let mut conf = ConsensusConf::default();
        self.caller.abi_context().decode_into(
            &result,
            &mut [
                &mut conf.block_delay,
                &mut conf.idle_timeout,
                &mut conf.commit_timeout,
                &mut conf.view_change_timeout,
            ],
        )?;
        Ok(conf)
    }
}
