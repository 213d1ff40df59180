//! Liquidate part of a position and repay part of its debt

use super::{remove_to_strategy, swap_all_farming, sweep, ExecutionContext, Strategy, StrategyCore};
use crate::error::{Result, StrategyError};
use crate::events::StrategyEvent;
use crate::log_repay;
use crate::request::PartialCloseLiquidateParams;
use crate::venue::Venue;
use lyf_amm::units::display_amount;
use std::cmp::min;

/// Burns up to `max_lp_to_liquidate` LP, sells all farming token received,
/// and returns the base token plus any LP left over to the worker. The
/// worker repays `min(max_debt_repayment, debt)` out of that base; what is
/// left after repayment must reach `min_base_token`.
pub struct PartialCloseLiquidate {
    core: StrategyCore,
}

impl PartialCloseLiquidate {
    pub fn new(core: StrategyCore) -> Self {
        Self { core }
    }
}

impl Strategy for PartialCloseLiquidate {
    type Params = PartialCloseLiquidateParams;

    const NAME: &'static str = "PartialCloseLiquidate";

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn run(&self, venue: &mut Venue, ctx: &ExecutionContext, params: Self::Params) -> Result<StrategyEvent> {
        let lp_held = venue.balance_of(ctx.lp_token, ctx.strategy);
        let lp_liquidated = min(params.max_lp_to_liquidate, lp_held);
        let debt_repaid = min(params.max_debt_repayment, ctx.debt);

        remove_to_strategy(venue, ctx, lp_liquidated)?;
        swap_all_farming(venue, ctx)?;

        let base = venue.balance_of(ctx.base_token, ctx.strategy);
        let enough = match base.checked_sub(debt_repaid) {
            Some(net) => net >= params.min_base_token,
            None => false,
        };
        if !enough {
            return Err(StrategyError::InsufficientBaseTokenReceived {
                received: base,
                debt_repayment: debt_repaid,
                minimum: params.min_base_token,
            });
        }

        sweep(venue, ctx, ctx.base_token, ctx.worker)?;
        sweep(venue, ctx, ctx.lp_token, ctx.worker)?;
        log_repay!(
            "{} base returned to worker {:?}, {} earmarked for debt",
            display_amount(base),
            ctx.worker,
            display_amount(debt_repaid)
        );

        Ok(StrategyEvent::PartialCloseLiquidate {
            strategy: ctx.strategy,
            worker: ctx.worker,
            tokens: ctx.tokens(),
            lp_liquidated,
            debt_repaid,
        })
    }
}
