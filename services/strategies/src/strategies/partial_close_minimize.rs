//! Partially close a position selling only what the repayment needs

use super::{cover_deficit, remove_to_strategy, sweep, ExecutionContext, Strategy, StrategyCore};
use crate::error::{Result, StrategyError};
use crate::events::StrategyEvent;
use crate::request::PartialCloseMinimizeTradingParams;
use crate::venue::Venue;
use ethereum_types::U256;
use std::cmp::min;

/// Burns up to `max_lp_to_liquidate` LP and, when the base received falls
/// short of the repayment, buys exactly the shortfall with farming token.
/// Base and unburned LP return to the worker; leftover farming token goes to
/// the owner and must reach `min_farming_token`.
pub struct PartialCloseMinimizeTrading {
    core: StrategyCore,
}

impl PartialCloseMinimizeTrading {
    pub fn new(core: StrategyCore) -> Self {
        Self { core }
    }
}

impl Strategy for PartialCloseMinimizeTrading {
    type Params = PartialCloseMinimizeTradingParams;

    const NAME: &'static str = "PartialCloseMinimizeTrading";

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn run(&self, venue: &mut Venue, ctx: &ExecutionContext, params: Self::Params) -> Result<StrategyEvent> {
        let lp_held = venue.balance_of(ctx.lp_token, ctx.strategy);
        let lp_liquidated = min(params.max_lp_to_liquidate, lp_held);
        let debt_repaid = min(params.max_debt_repayment, ctx.debt);

        remove_to_strategy(venue, ctx, lp_liquidated)?;
        let base_held = venue.balance_of(ctx.base_token, ctx.strategy);
        let farming_swapped = match debt_repaid.checked_sub(base_held) {
            Some(deficit) => cover_deficit(venue, ctx, deficit)?,
            None => U256::zero(),
        };

        sweep(venue, ctx, ctx.base_token, ctx.worker)?;
        sweep(venue, ctx, ctx.lp_token, ctx.worker)?;

        let farming_left = venue.balance_of(ctx.farming_token, ctx.strategy);
        if farming_left < params.min_farming_token {
            return Err(StrategyError::InsufficientFarmingTokenReceived {
                received: farming_left,
                minimum: params.min_farming_token,
            });
        }
        let farming_to_owner = sweep(venue, ctx, ctx.farming_token, ctx.owner)?;

        Ok(StrategyEvent::PartialCloseMinimizeTrading {
            strategy: ctx.strategy,
            worker: ctx.worker,
            tokens: ctx.tokens(),
            owner: ctx.owner,
            lp_liquidated,
            debt_repaid,
            farming_swapped,
            farming_to_owner,
        })
    }
}
