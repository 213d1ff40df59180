//! Custody check for strategy scopes
//!
//! A strategy never keeps tokens between calls. [`CustodyGuard`] records which
//! tokens a strategy may touch. It refuses to open over a strategy that already
//! holds any of them, and settling fails the call if any are still held.

use crate::error::{Result, StrategyError};
use crate::venue::Venue;
use ethereum_types::Address;
use tracing::warn;

#[derive(Debug)]
pub struct CustodyGuard {
    holder: Address,
    tokens: Vec<Address>,
}

impl CustodyGuard {
    /// Open a scope over `tokens`; the holder must start empty
    pub fn enter(venue: &Venue, holder: Address, tokens: impl Into<Vec<Address>>) -> Result<Self> {
        let guard = Self {
            holder,
            tokens: tokens.into(),
        };
        guard.settle(venue)?;
        Ok(guard)
    }

    pub fn covers(&self, token: Address) -> bool {
        self.tokens.contains(&token)
    }

    /// Require a zero balance of every guarded token
    pub fn settle(&self, venue: &Venue) -> Result<()> {
        for token in &self.tokens {
            let amount = venue.balance_of(*token, self.holder);
            if !amount.is_zero() {
                warn!(holder = ?self.holder, ?token, %amount, "Strategy custody not empty");
                return Err(StrategyError::ResidualBalance {
                    token: *token,
                    amount,
                });
            }
        }
        Ok(())
    }
}
