//! Close a position selling as little farming token as possible

use super::{cover_deficit, remove_to_strategy, sweep, ExecutionContext, Strategy, StrategyCore};
use crate::error::{Result, StrategyError};
use crate::events::StrategyEvent;
use crate::log_liquidity;
use crate::request::WithdrawMinimizeTradingParams;
use crate::venue::Venue;
use ethereum_types::U256;
use lyf_amm::units::display_amount;

/// Burns every LP token the strategy holds. Farming token is sold only to
/// cover a base shortfall against the debt; all base goes back to the worker
/// and the remaining farming token to the position owner.
pub struct WithdrawMinimizeTrading {
    core: StrategyCore,
}

impl WithdrawMinimizeTrading {
    pub fn new(core: StrategyCore) -> Self {
        Self { core }
    }
}

impl Strategy for WithdrawMinimizeTrading {
    type Params = WithdrawMinimizeTradingParams;

    const NAME: &'static str = "WithdrawMinimizeTrading";

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn run(&self, venue: &mut Venue, ctx: &ExecutionContext, params: Self::Params) -> Result<StrategyEvent> {
        let lp_burned = venue.balance_of(ctx.lp_token, ctx.strategy);
        let (base, farming) = remove_to_strategy(venue, ctx, lp_burned)?;
        log_liquidity!(
            remove,
            "burned {} LP for {} base and {} farming",
            display_amount(lp_burned),
            display_amount(base),
            display_amount(farming)
        );

        let base_held = venue.balance_of(ctx.base_token, ctx.strategy);
        let farming_swapped = match ctx.debt.checked_sub(base_held) {
            Some(deficit) => cover_deficit(venue, ctx, deficit)?,
            None => U256::zero(),
        };

        let base_to_worker = sweep(venue, ctx, ctx.base_token, ctx.worker)?;

        let farming_left = venue.balance_of(ctx.farming_token, ctx.strategy);
        if farming_left < params.min_farming_token {
            return Err(StrategyError::InsufficientFarmingTokenReceived {
                received: farming_left,
                minimum: params.min_farming_token,
            });
        }
        let farming_to_owner = sweep(venue, ctx, ctx.farming_token, ctx.owner)?;

        Ok(StrategyEvent::WithdrawMinimizeTrading {
            strategy: ctx.strategy,
            worker: ctx.worker,
            tokens: ctx.tokens(),
            owner: ctx.owner,
            lp_burned,
            farming_swapped,
            base_to_worker,
            farming_to_owner,
        })
    }
}
