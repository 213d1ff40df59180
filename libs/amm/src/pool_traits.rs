//! Pool trait definitions for unified AMM interface

use crate::error::Result;
use crate::fee::FeeSchedule;
use crate::v2_math::{V2Math, V2PoolState};
use ethereum_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// DEX families the strategies are deployed against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolType {
    PancakeSwapV2,
    UniswapV2,
    SushiSwap,
    WaultSwap,
    SpookySwap,
    /// Fee is configured per pair by the factory
    Mdex,
}

impl PoolType {
    pub const ALL: [PoolType; 6] = [
        PoolType::PancakeSwapV2,
        PoolType::UniswapV2,
        PoolType::SushiSwap,
        PoolType::WaultSwap,
        PoolType::SpookySwap,
        PoolType::Mdex,
    ];

    /// Factory-wide fee schedule for this DEX
    pub fn default_fee(&self) -> FeeSchedule {
        match self {
            PoolType::PancakeSwapV2 => FeeSchedule::BPS_25,
            PoolType::UniswapV2 | PoolType::SushiSwap | PoolType::Mdex => FeeSchedule::BPS_30,
            PoolType::WaultSwap | PoolType::SpookySwap => FeeSchedule::BPS_20,
        }
    }

    /// Configuration key, e.g. `pancake_swap_v2`
    pub fn key(&self) -> &'static str {
        match self {
            PoolType::PancakeSwapV2 => "pancake_swap_v2",
            PoolType::UniswapV2 => "uniswap_v2",
            PoolType::SushiSwap => "sushi_swap",
            PoolType::WaultSwap => "wault_swap",
            PoolType::SpookySwap => "spooky_swap",
            PoolType::Mdex => "mdex",
        }
    }

    pub fn from_key(key: &str) -> Option<PoolType> {
        Self::ALL.into_iter().find(|pool_type| pool_type.key() == key)
    }
}

impl fmt::Display for PoolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Unified pool interface for swap quoting
pub trait AmmPool {
    /// Calculate output amount for given input
    fn get_amount_out(&self, amount_in: U256) -> Result<U256>;

    /// Calculate required input for desired output
    fn get_amount_in(&self, amount_out: U256) -> Result<U256>;

    /// Get current reserves as (in, out)
    fn get_liquidity(&self) -> (U256, U256);

    /// Get fee schedule
    fn fee_schedule(&self) -> FeeSchedule;
}

impl AmmPool for V2PoolState {
    fn get_amount_out(&self, amount_in: U256) -> Result<U256> {
        V2Math::get_amount_out(amount_in, self.reserve_in, self.reserve_out, self.fee)
    }

    fn get_amount_in(&self, amount_out: U256) -> Result<U256> {
        V2Math::get_amount_in(amount_out, self.reserve_in, self.reserve_out, self.fee)
    }

    fn get_liquidity(&self) -> (U256, U256) {
        (self.reserve_in, self.reserve_out)
    }

    fn fee_schedule(&self) -> FeeSchedule {
        self.fee
    }
}
