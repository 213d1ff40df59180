//! Strategy events
//!
//! Every successful strategy execution and every allow-list change appends
//! one event to the venue log. Events serialize to tagged JSON for indexers;
//! amounts and addresses render as `0x`-prefixed hex.

use ethereum_types::{Address, U256};
use lyf_amm::SwapDirection;
use serde::{Deserialize, Serialize};

/// Tokens of the position a strategy worked on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionTokens {
    pub base_token: Address,
    pub farming_token: Address,
    /// Pair address, which is also the LP token
    pub lp_token: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StrategyEvent {
    AddSingleSidedOptimal {
        strategy: Address,
        worker: Address,
        tokens: PositionTokens,
        base_amount: U256,
        swap_amount: U256,
        lp_minted: U256,
        base_debris: U256,
        farming_debris: U256,
    },
    AddTwoSidedOptimal {
        strategy: Address,
        worker: Address,
        tokens: PositionTokens,
        base_amount: U256,
        farming_amount: U256,
        swap_amount: U256,
        swap_direction: Option<SwapDirection>,
        lp_minted: U256,
        base_debris: U256,
        farming_debris: U256,
    },
    WithdrawMinimizeTrading {
        strategy: Address,
        worker: Address,
        tokens: PositionTokens,
        owner: Address,
        lp_burned: U256,
        farming_swapped: U256,
        base_to_worker: U256,
        farming_to_owner: U256,
    },
    PartialCloseLiquidate {
        strategy: Address,
        worker: Address,
        tokens: PositionTokens,
        lp_liquidated: U256,
        debt_repaid: U256,
    },
    Liquidate {
        strategy: Address,
        worker: Address,
        tokens: PositionTokens,
        lp_burned: U256,
        base_to_worker: U256,
    },
    PartialCloseMinimizeTrading {
        strategy: Address,
        worker: Address,
        tokens: PositionTokens,
        owner: Address,
        lp_liquidated: U256,
        debt_repaid: U256,
        farming_swapped: U256,
        farming_to_owner: U256,
    },
    CallerSet {
        strategy: Address,
        caller: Address,
        ok: bool,
    },
    OwnershipTransferred {
        strategy: Address,
        previous_owner: Address,
        new_owner: Address,
    },
}

impl StrategyEvent {
    pub fn name(&self) -> &'static str {
        match self {
            StrategyEvent::AddSingleSidedOptimal { .. } => "add_single_sided_optimal",
            StrategyEvent::AddTwoSidedOptimal { .. } => "add_two_sided_optimal",
            StrategyEvent::WithdrawMinimizeTrading { .. } => "withdraw_minimize_trading",
            StrategyEvent::PartialCloseLiquidate { .. } => "partial_close_liquidate",
            StrategyEvent::Liquidate { .. } => "liquidate",
            StrategyEvent::PartialCloseMinimizeTrading { .. } => "partial_close_minimize_trading",
            StrategyEvent::CallerSet { .. } => "caller_set",
            StrategyEvent::OwnershipTransferred { .. } => "ownership_transferred",
        }
    }

    /// Strategy contract that emitted the event
    pub fn strategy(&self) -> Address {
        match self {
            StrategyEvent::AddSingleSidedOptimal { strategy, .. }
            | StrategyEvent::AddTwoSidedOptimal { strategy, .. }
            | StrategyEvent::WithdrawMinimizeTrading { strategy, .. }
            | StrategyEvent::PartialCloseLiquidate { strategy, .. }
            | StrategyEvent::Liquidate { strategy, .. }
            | StrategyEvent::PartialCloseMinimizeTrading { strategy, .. }
            | StrategyEvent::CallerSet { strategy, .. }
            | StrategyEvent::OwnershipTransferred { strategy, .. } => *strategy,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
