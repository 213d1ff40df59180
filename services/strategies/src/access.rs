//! Caller allow-list guarding every strategy entry point
//!
//! Only position managers the owner has explicitly allowed may execute a
//! strategy. Unknown callers are denied. The list is shared between strategy
//! instances through [`SharedAllowList`].

use crate::error::{Result, StrategyError};
use ethereum_types::Address;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CallerState {
    Allowed,
    #[default]
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerAllowList {
    owner: Address,
    callers: HashMap<Address, CallerState>,
}

pub type SharedAllowList = Arc<RwLock<CallerAllowList>>;

impl CallerAllowList {
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            callers: HashMap::new(),
        }
    }

    /// Wrap a fresh list for sharing between strategies
    pub fn shared(owner: Address) -> SharedAllowList {
        Arc::new(RwLock::new(Self::new(owner)))
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn state(&self, caller: Address) -> CallerState {
        self.callers.get(&caller).copied().unwrap_or_default()
    }

    pub fn is_allowed(&self, caller: Address) -> bool {
        self.state(caller) == CallerState::Allowed
    }

    pub fn ensure_allowed(&self, caller: Address) -> Result<()> {
        if self.is_allowed(caller) {
            Ok(())
        } else {
            Err(StrategyError::UnauthorizedCaller(caller))
        }
    }

    /// Allow or deny a batch of callers. Owner only.
    pub fn set_callers_ok(&mut self, sender: Address, callers: &[Address], ok: bool) -> Result<()> {
        self.ensure_owner(sender)?;
        let state = if ok {
            CallerState::Allowed
        } else {
            CallerState::Denied
        };
        for caller in callers {
            self.callers.insert(*caller, state);
            debug!(?caller, ?state, "Caller state updated");
        }
        Ok(())
    }

    /// Hand the list to a new owner. Owner only.
    pub fn transfer_ownership(&mut self, sender: Address, new_owner: Address) -> Result<()> {
        self.ensure_owner(sender)?;
        self.owner = new_owner;
        Ok(())
    }

    fn ensure_owner(&self, sender: Address) -> Result<()> {
        if sender != self.owner {
            warn!(?sender, owner = ?self.owner, "Rejected allow-list change from non-owner");
            return Err(StrategyError::NotOwner { sender });
        }
        Ok(())
    }
}
