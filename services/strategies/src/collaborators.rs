//! Interfaces to the contracts a strategy works for
//!
//! A position manager (worker) owns the LP of every position it manages and
//! calls strategies on their behalf. A lending ledger (vault) lends the base
//! token and can pull extra farming token from a position owner when a
//! two-sided add asks for it. A worker's hand-off to a strategy travels with
//! the call as a list of [`TokenAmount`]s.

use crate::error::Result;
use crate::venue::Venue;
use ethereum_types::{Address, U256};
use tracing::debug;

pub trait PositionManager {
    fn address(&self) -> Address;

    /// Token the position's debt is denominated in
    fn base_token(&self) -> Address;

    fn farming_token(&self) -> Address;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerHandle {
    pub address: Address,
    pub base_token: Address,
    pub farming_token: Address,
}

impl PositionManager for WorkerHandle {
    fn address(&self) -> Address {
        self.address
    }

    fn base_token(&self) -> Address {
        self.base_token
    }

    fn farming_token(&self) -> Address {
        self.farming_token
    }
}

/// Tokens a worker hands to a strategy as part of a call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenAmount {
    pub token: Address,
    pub amount: U256,
}

impl TokenAmount {
    pub fn new(token: Address, amount: U256) -> Self {
        Self { token, amount }
    }
}

pub trait LendingLedger: Send + Sync {
    fn address(&self) -> Address;

    /// Move `amount` of `token` from the position `owner` to `recipient`
    fn request_funds(
        &self,
        venue: &mut Venue,
        token: Address,
        owner: Address,
        amount: U256,
        recipient: Address,
    ) -> Result<()>;
}

/// Vault that pulls funds position owners have approved it to spend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultFunding {
    address: Address,
}

impl VaultFunding {
    pub fn new(address: Address) -> Self {
        Self { address }
    }
}

impl LendingLedger for VaultFunding {
    fn address(&self) -> Address {
        self.address
    }

    fn request_funds(
        &self,
        venue: &mut Venue,
        token: Address,
        owner: Address,
        amount: U256,
        recipient: Address,
    ) -> Result<()> {
        venue.transfer_from(self.address, token, owner, recipient, amount)?;
        debug!(?token, ?owner, ?recipient, %amount, "Vault funds requested");
        Ok(())
    }
}
