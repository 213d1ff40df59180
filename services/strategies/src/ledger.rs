//! Token balances keyed by `(token, holder)` and spending allowances keyed by
//! `(token, owner, spender)`

use crate::error::{Result, StrategyError};
use ethereum_types::{Address, U256};
use lyf_amm::checked::CheckedMath;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenLedger {
    balances: HashMap<(Address, Address), U256>,
    allowances: HashMap<(Address, Address, Address), U256>,
}

impl TokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, token: Address, holder: Address) -> U256 {
        self.balances
            .get(&(token, holder))
            .copied()
            .unwrap_or_default()
    }

    pub fn credit(&mut self, token: Address, holder: Address, amount: U256) -> Result<()> {
        let balance = self
            .balance_of(token, holder)
            .try_add(amount, "ledger.credit")?;
        self.balances.insert((token, holder), balance);
        Ok(())
    }

    pub fn debit(&mut self, token: Address, holder: Address, amount: U256) -> Result<()> {
        let balance = self.balance_of(token, holder);
        if balance < amount {
            return Err(StrategyError::InsufficientBalance {
                token,
                holder,
                balance,
                requested: amount,
            });
        }
        let remaining = balance - amount;
        if remaining.is_zero() {
            self.balances.remove(&(token, holder));
        } else {
            self.balances.insert((token, holder), remaining);
        }
        Ok(())
    }

    pub fn transfer(&mut self, token: Address, from: Address, to: Address, amount: U256) -> Result<()> {
        if amount.is_zero() || from == to {
            return Ok(());
        }
        self.debit(token, from, amount)?;
        self.credit(token, to, amount)
    }

    pub fn allowance(&self, token: Address, owner: Address, spender: Address) -> U256 {
        self.allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or_default()
    }

    pub fn approve(&mut self, token: Address, owner: Address, spender: Address, amount: U256) {
        if amount.is_zero() {
            self.allowances.remove(&(token, owner, spender));
        } else {
            self.allowances.insert((token, owner, spender), amount);
        }
    }

    /// Transfer on behalf of `from`, spending `spender`'s allowance
    pub fn transfer_from(
        &mut self,
        spender: Address,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<()> {
        let allowance = self.allowance(token, from, spender);
        if allowance < amount {
            return Err(StrategyError::InsufficientAllowance {
                token,
                owner: from,
                allowance,
                requested: amount,
            });
        }
        self.transfer(token, from, to, amount)?;
        self.approve(token, from, spender, allowance - amount);
        Ok(())
    }
}
