//! Convert the whole position back to base token

use super::{remove_to_strategy, swap_all_farming, sweep, ExecutionContext, Strategy, StrategyCore};
use crate::error::{Result, StrategyError};
use crate::events::StrategyEvent;
use crate::request::LiquidateParams;
use crate::venue::Venue;
use ethereum_types::U256;

pub struct Liquidate {
    core: StrategyCore,
}

impl Liquidate {
    pub fn new(core: StrategyCore) -> Self {
        Self { core }
    }
}

impl Strategy for Liquidate {
    type Params = LiquidateParams;

    const NAME: &'static str = "Liquidate";

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn run(&self, venue: &mut Venue, ctx: &ExecutionContext, params: Self::Params) -> Result<StrategyEvent> {
        let lp_burned = venue.balance_of(ctx.lp_token, ctx.strategy);
        remove_to_strategy(venue, ctx, lp_burned)?;
        swap_all_farming(venue, ctx)?;

        let base = venue.balance_of(ctx.base_token, ctx.strategy);
        if base < params.min_base_token {
            return Err(StrategyError::InsufficientBaseTokenReceived {
                received: base,
                debt_repayment: U256::zero(),
                minimum: params.min_base_token,
            });
        }
        let base_to_worker = sweep(venue, ctx, ctx.base_token, ctx.worker)?;

        Ok(StrategyEvent::Liquidate {
            strategy: ctx.strategy,
            worker: ctx.worker,
            tokens: ctx.tokens(),
            lp_burned,
            base_to_worker,
        })
    }
}
