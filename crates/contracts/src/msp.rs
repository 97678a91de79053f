//! Membership service provider contract

use crate::dpos::ConsensusMember;
use crate::error::Result;
use crate::executor::{build_payload, ContractCaller};
use crate::types::{BlockRef, ContractType, Transaction};
use contract_abi::{selector, Address, ParamType, Value};
use tracing::{debug, warn};

const INIT_MANAGERS: &str = "initManagers(address[])";
const IS_AUTHORIZED: &str = "isAuthorized(address)";

/// Single-address manager actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MspAction {
    VoteAddManager,
    VoteRemoveManager,
    AuthorizeMember,
    RevokeAuthorization,
}

impl MspAction {
    pub fn signature(&self) -> &'static str {
        match self {
            Self::VoteAddManager => "voteAddManager(address)",
            Self::VoteRemoveManager => "voteRemoveManager(address)",
            Self::AuthorizeMember => "authorizeMember(address)",
            Self::RevokeAuthorization => "revokeAuthorization(address)",
        }
    }
}

/// Binding for the MSP contract
#[derive(Debug, Clone)]
pub struct MspContract {
    caller: ContractCaller,
}

impl MspContract {
    pub fn new(caller: ContractCaller) -> Self {
        Self { caller }
    }

    /// Build the transaction that seeds the manager list from the members
    pub fn init_transaction(
        nonce: u64,
        caller: Address,
        contract: Address,
        members: &[ConsensusMember],
    ) -> Result<Transaction> {
        let managers: Vec<Address> = members.iter().map(|m| m.addr).collect();
        debug!("Building MSP init transaction for {} managers", managers.len());
        let payload = build_payload(selector(INIT_MANAGERS), &[Value::AddressArray(managers)])?;
        Ok(Transaction::new(nonce, caller, contract, payload))
    }

    /// Build a manager vote or authorization transaction for `target`
    pub fn action_transaction(
        action: MspAction,
        nonce: u64,
        caller: Address,
        contract: Address,
        target: Address,
    ) -> Result<Transaction> {
        let payload = build_payload(selector(action.signature()), &[Value::Address(target)])?;
        Ok(Transaction::new(nonce, caller, contract, payload))
    }

    /// Whether `addr` may take part
    ///
    /// Everyone is authorized until an MSP contract is registered. Once it
    /// is, any failure to read it denies access.
    pub async fn is_authorized(&self, addr: &Address) -> bool {
        let Some(contract) = self.caller.registry().lookup(ContractType::Msp) else {
            return true;
        };
        match self.try_is_authorized(contract, addr).await {
            Ok(authorized) => authorized,
            Err(e) => {
                warn!("MSP authorization check for {} failed: {}", addr, e);
                false
            }
        }
    }

    async fn try_is_authorized(&self, contract: Address, addr: &Address) -> Result<bool> {
        let payload = build_payload(selector(IS_AUTHORIZED), &[Value::Address(*addr)])?;
        let values = self
            .caller
            .call_decode(contract, payload, BlockRef::Latest, &[ParamType::Bool])
            .await?;
        Ok(matches!(values.first(), Some(Value::Bool(true))))
    }
}
