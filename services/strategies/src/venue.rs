//! # Execution Venue - In-Memory Chain State for Strategy Calls
//!
//! ## Purpose
//!
//! Holds everything a strategy call can touch: token balances, constant-product
//! pairs (keyed by address, LP token address == pair address), and the event
//! log. Exposes a pair factory and a router with Uniswap V2 Router02 semantics
//! so strategies move tokens exactly as they would on chain.
//!
//! ## Atomicity
//!
//! [`Venue::atomic`] snapshots the whole venue and restores it when the closure
//! fails, so a reverted call leaves no partial swap, transfer or event behind.
//! Scopes nest: a strategy's scope runs inside whatever scope its caller opened.
//!
//! ## Pair Primitives
//!
//! The router follows the pair contract protocol: tokens are transferred to
//! the pair first, then `mint`/`swap` read the pair's balance above its
//! reserves, and `burn` redeems the LP tokens the pair itself holds.

use crate::error::{Result, StrategyError};
use crate::events::StrategyEvent;
use crate::ledger::TokenLedger;
use crate::settings::StrategySettings;
use ethereum_types::{Address, U256};
use lyf_amm::{sort_tokens, AmmError, ConstantProductPool, FeeSchedule, PoolType, V2Math, V2PoolState};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Pair addresses are allocated sequentially from here
const PAIR_ADDRESS_BASE: u64 = 0x5041_4952_0000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Venue {
    ledger: TokenLedger,
    pools: HashMap<Address, ConstantProductPool>,
    pairs: HashMap<(Address, Address), Address>,
    events: Vec<StrategyEvent>,
}

impl Venue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against the venue, restoring the prior state if it fails
    pub fn atomic<T, E, F>(&mut self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut Venue) -> std::result::Result<T, E>,
    {
        let snapshot = self.clone();
        let result = f(self);
        if result.is_err() {
            *self = snapshot;
            debug!("Venue state rolled back");
        }
        result
    }

    // Factory

    pub fn create_pool(
        &mut self,
        token_a: Address,
        token_b: Address,
        fee: FeeSchedule,
        pool_type: PoolType,
    ) -> Result<Address> {
        let key = sort_tokens(token_a, token_b);
        if self.pairs.contains_key(&key) {
            return Err(StrategyError::PairExists { token_a, token_b });
        }
        let address = Address::from_low_u64_be(PAIR_ADDRESS_BASE + self.pools.len() as u64);
        let pool = ConstantProductPool::new(address, token_a, token_b, fee, pool_type)?;

        debug!(pair = ?address, ?token_a, ?token_b, %fee, %pool_type, "Pair created");
        self.pools.insert(address, pool);
        self.pairs.insert(key, address);
        Ok(address)
    }

    /// Create a pair on `pool_type` at the fee the settings give that DEX
    pub fn create_dex_pool(
        &mut self,
        token_a: Address,
        token_b: Address,
        pool_type: PoolType,
        settings: &StrategySettings,
    ) -> Result<Address> {
        self.create_pool(token_a, token_b, settings.fee_for(pool_type), pool_type)
    }

    pub fn pair_for(&self, token_a: Address, token_b: Address) -> Result<Address> {
        self.pairs
            .get(&sort_tokens(token_a, token_b))
            .copied()
            .ok_or(StrategyError::UnknownPair { token_a, token_b })
    }

    pub fn pool(&self, pair: Address) -> Result<&ConstantProductPool> {
        self.pools.get(&pair).ok_or(StrategyError::UnknownPool(pair))
    }

    pub fn pools(&self) -> impl Iterator<Item = &ConstantProductPool> {
        self.pools.values()
    }

    fn pool_mut(&mut self, pair: Address) -> Result<&mut ConstantProductPool> {
        self.pools
            .get_mut(&pair)
            .ok_or(StrategyError::UnknownPool(pair))
    }

    // Tokens

    pub fn balance_of(&self, token: Address, holder: Address) -> U256 {
        self.ledger.balance_of(token, holder)
    }

    /// Credit freshly issued tokens to `to`
    pub fn mint_tokens(&mut self, token: Address, to: Address, amount: U256) -> Result<()> {
        self.ledger.credit(token, to, amount)
    }

    pub fn transfer(&mut self, token: Address, from: Address, to: Address, amount: U256) -> Result<()> {
        trace!(?token, ?from, ?to, %amount, "Transfer");
        self.ledger.transfer(token, from, to, amount)
    }

    pub fn allowance(&self, token: Address, owner: Address, spender: Address) -> U256 {
        self.ledger.allowance(token, owner, spender)
    }

    pub fn approve(&mut self, token: Address, owner: Address, spender: Address, amount: U256) {
        trace!(?token, ?owner, ?spender, %amount, "Approve");
        self.ledger.approve(token, owner, spender, amount);
    }

    pub fn transfer_from(
        &mut self,
        spender: Address,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<()> {
        trace!(?spender, ?token, ?from, ?to, %amount, "Transfer from");
        self.ledger.transfer_from(spender, token, from, to, amount)
    }

    // Events

    pub fn emit(&mut self, event: StrategyEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[StrategyEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<StrategyEvent> {
        std::mem::take(&mut self.events)
    }

    // Router

    #[allow(clippy::too_many_arguments)]
    pub fn add_liquidity(
        &mut self,
        sender: Address,
        token_a: Address,
        token_b: Address,
        amount_a_desired: U256,
        amount_b_desired: U256,
        amount_a_min: U256,
        amount_b_min: U256,
        to: Address,
    ) -> Result<(U256, U256, U256)> {
        let pair = self.pair_for(token_a, token_b)?;
        let (reserve_a, reserve_b) = self.pool(pair)?.reserves_for(token_a)?;

        let (amount_a, amount_b) = if reserve_a.is_zero() && reserve_b.is_zero() {
            (amount_a_desired, amount_b_desired)
        } else {
            let amount_b_optimal = V2Math::quote(amount_a_desired, reserve_a, reserve_b)?;
            if amount_b_optimal <= amount_b_desired {
                if amount_b_optimal < amount_b_min {
                    return Err(AmmError::InsufficientBAmount {
                        amount: amount_b_optimal,
                        minimum: amount_b_min,
                    }
                    .into());
                }
                (amount_a_desired, amount_b_optimal)
            } else {
                let amount_a_optimal = V2Math::quote(amount_b_desired, reserve_b, reserve_a)?;
                if amount_a_optimal > amount_a_desired {
                    return Err(AmmError::ExcessiveInputAmount {
                        required: amount_a_optimal,
                        maximum: amount_a_desired,
                    }
                    .into());
                }
                if amount_a_optimal < amount_a_min {
                    return Err(AmmError::InsufficientAAmount {
                        amount: amount_a_optimal,
                        minimum: amount_a_min,
                    }
                    .into());
                }
                (amount_a_optimal, amount_b_desired)
            }
        };

        self.transfer(token_a, sender, pair, amount_a)?;
        self.transfer(token_b, sender, pair, amount_b)?;
        let liquidity = self.pair_mint(pair, to)?;

        debug!(?pair, %amount_a, %amount_b, %liquidity, "Liquidity added");
        Ok((amount_a, amount_b, liquidity))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn remove_liquidity(
        &mut self,
        sender: Address,
        token_a: Address,
        token_b: Address,
        liquidity: U256,
        amount_a_min: U256,
        amount_b_min: U256,
        to: Address,
    ) -> Result<(U256, U256)> {
        let pair = self.pair_for(token_a, token_b)?;
        self.transfer(pair, sender, pair, liquidity)?;
        let (amount0, amount1) = self.pair_burn(pair, to)?;

        let (amount_a, amount_b) = if token_a == self.pool(pair)?.token0 {
            (amount0, amount1)
        } else {
            (amount1, amount0)
        };
        if amount_a < amount_a_min {
            return Err(AmmError::InsufficientAAmount {
                amount: amount_a,
                minimum: amount_a_min,
            }
            .into());
        }
        if amount_b < amount_b_min {
            return Err(AmmError::InsufficientBAmount {
                amount: amount_b,
                minimum: amount_b_min,
            }
            .into());
        }

        debug!(?pair, %liquidity, %amount_a, %amount_b, "Liquidity removed");
        Ok((amount_a, amount_b))
    }

    pub fn swap_exact_tokens_for_tokens(
        &mut self,
        sender: Address,
        amount_in: U256,
        amount_out_min: U256,
        path: &[Address],
        to: Address,
    ) -> Result<Vec<U256>> {
        let (pairs, hops) = self.route(path)?;
        let amounts = V2Math::get_amounts_out(amount_in, &hops)?;
        let amount_out = amounts.last().copied().ok_or(AmmError::InvalidPath)?;
        if amount_out < amount_out_min {
            return Err(AmmError::InsufficientOutputAmount.into());
        }

        self.transfer(path[0], sender, pairs[0], amount_in)?;
        self.execute_swaps(&amounts, path, &pairs, to)?;
        debug!(%amount_in, %amount_out, hops = pairs.len(), "Swapped exact input");
        Ok(amounts)
    }

    pub fn swap_tokens_for_exact_tokens(
        &mut self,
        sender: Address,
        amount_out: U256,
        amount_in_max: U256,
        path: &[Address],
        to: Address,
    ) -> Result<Vec<U256>> {
        let (pairs, hops) = self.route(path)?;
        let amounts = V2Math::get_amounts_in(amount_out, &hops)?;
        let amount_in = amounts.first().copied().ok_or(AmmError::InvalidPath)?;
        if amount_in > amount_in_max {
            return Err(AmmError::ExcessiveInputAmount {
                required: amount_in,
                maximum: amount_in_max,
            }
            .into());
        }

        self.transfer(path[0], sender, pairs[0], amount_in)?;
        self.execute_swaps(&amounts, path, &pairs, to)?;
        debug!(%amount_in, %amount_out, hops = pairs.len(), "Swapped for exact output");
        Ok(amounts)
    }

    /// Pairs and directional views along `path`; at least one hop
    fn route(&self, path: &[Address]) -> Result<(Vec<Address>, Vec<V2PoolState>)> {
        if path.len() < 2 {
            return Err(AmmError::InvalidPath.into());
        }
        let hops = path
            .windows(2)
            .map(|hop| {
                let pair = self.pair_for(hop[0], hop[1])?;
                let view = self.pool(pair)?.view(hop[0])?;
                Ok((pair, view))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(hops.into_iter().unzip())
    }

    fn execute_swaps(
        &mut self,
        amounts: &[U256],
        path: &[Address],
        pairs: &[Address],
        to: Address,
    ) -> Result<()> {
        for (i, pair) in pairs.iter().enumerate() {
            let recipient = pairs.get(i + 1).copied().unwrap_or(to);
            self.pair_swap(*pair, path[i], amounts[i + 1], recipient)?;
        }
        Ok(())
    }

    // Pair primitives

    fn pair_mint(&mut self, pair: Address, to: Address) -> Result<U256> {
        let pool = self.pool(pair)?;
        let (token0, token1) = (pool.token0, pool.token1);
        let (reserve0, reserve1) = pool.reserves();

        let amount0 = self
            .balance_of(token0, pair)
            .checked_sub(reserve0)
            .ok_or(AmmError::Underflow("mint.amount0"))?;
        let amount1 = self
            .balance_of(token1, pair)
            .checked_sub(reserve1)
            .ok_or(AmmError::Underflow("mint.amount1"))?;

        let (minted, locked) = self.pool_mut(pair)?.mint(amount0, amount1)?;
        if !locked.is_zero() {
            self.ledger.credit(pair, Address::zero(), locked)?;
        }
        self.ledger.credit(pair, to, minted)?;
        Ok(minted)
    }

    fn pair_burn(&mut self, pair: Address, to: Address) -> Result<(U256, U256)> {
        let shares = self.balance_of(pair, pair);
        let pool = self.pool_mut(pair)?;
        let (token0, token1) = (pool.token0, pool.token1);
        let (amount0, amount1) = pool.burn(shares)?;

        self.ledger.debit(pair, pair, shares)?;
        self.ledger.transfer(token0, pair, to, amount0)?;
        self.ledger.transfer(token1, pair, to, amount1)?;
        Ok((amount0, amount1))
    }

    fn pair_swap(&mut self, pair: Address, token_in: Address, amount_out: U256, to: Address) -> Result<()> {
        let pool = self.pool(pair)?;
        let token_out = pool.counterpart(token_in)?;
        let (reserve_in, _) = pool.reserves_for(token_in)?;
        let amount_in = self
            .balance_of(token_in, pair)
            .checked_sub(reserve_in)
            .unwrap_or_default();

        self.pool_mut(pair)?.swap(token_in, amount_in, amount_out)?;
        self.ledger.transfer(token_out, pair, to, amount_out)?;
        trace!(?pair, ?token_in, %amount_in, %amount_out, "Pair swap");
        Ok(())
    }
}
