//! Turn base token into LP with a single optimally sized swap

use super::{describe_impact, sweep, ExecutionContext, Strategy, StrategyCore};
use crate::error::{Result, StrategyError};
use crate::events::StrategyEvent;
use crate::request::AddSingleSidedParams;
use crate::venue::Venue;
use crate::{log_liquidity, log_swap};
use ethereum_types::U256;
use lyf_amm::units::display_amount;
use lyf_amm::SwapSolver;

/// Swaps the share of the deposited base token that leaves the remainder and
/// the swap output in the post-swap pool ratio, then adds both as liquidity.
/// LP goes to the worker, rounding debris is swept back to it.
pub struct AddSingleSidedOptimal {
    core: StrategyCore,
}

impl AddSingleSidedOptimal {
    pub fn new(core: StrategyCore) -> Self {
        Self { core }
    }
}

impl Strategy for AddSingleSidedOptimal {
    type Params = AddSingleSidedParams;

    const NAME: &'static str = "AddSingleSidedOptimal";

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn run(&self, venue: &mut Venue, ctx: &ExecutionContext, params: Self::Params) -> Result<StrategyEvent> {
        let base_amount = venue.balance_of(ctx.base_token, ctx.strategy);

        let pool = venue.pool(ctx.lp_token)?;
        let fee = pool.fee();
        let (reserve_base, reserve_farming) = pool.reserves_for(ctx.base_token)?;
        let swap_amount = SwapSolver::optimal_one_sided_swap(base_amount, reserve_base, fee)?;

        if !swap_amount.is_zero() {
            let impact = describe_impact(swap_amount, reserve_base, reserve_farming, fee);
            venue.swap_exact_tokens_for_tokens(
                ctx.strategy,
                swap_amount,
                U256::zero(),
                &ctx.path_to_farming(),
                ctx.strategy,
            )?;
            log_swap!(
                "swapped {} of {} base for farming, impact {}",
                display_amount(swap_amount),
                display_amount(base_amount),
                impact
            );
        }

        let base_balance = venue.balance_of(ctx.base_token, ctx.strategy);
        let farming_balance = venue.balance_of(ctx.farming_token, ctx.strategy);
        let (_, _, lp_minted) = venue.add_liquidity(
            ctx.strategy,
            ctx.base_token,
            ctx.farming_token,
            base_balance,
            farming_balance,
            U256::zero(),
            U256::zero(),
            ctx.worker,
        )?;
        if lp_minted < params.min_lp_amount {
            return Err(StrategyError::InsufficientLiquidityReceived {
                received: lp_minted,
                minimum: params.min_lp_amount,
            });
        }
        log_liquidity!(add, "minted {} LP to worker {:?}", display_amount(lp_minted), ctx.worker);

        let base_debris = sweep(venue, ctx, ctx.base_token, ctx.worker)?;
        let farming_debris = sweep(venue, ctx, ctx.farming_token, ctx.worker)?;

        Ok(StrategyEvent::AddSingleSidedOptimal {
            strategy: ctx.strategy,
            worker: ctx.worker,
            tokens: ctx.tokens(),
            base_amount,
            swap_amount,
            lp_minted,
            base_debris,
            farming_debris,
        })
    }
}
