//! Add base and farming token in any proportion, rebalancing with one swap

use super::{describe_impact, sweep, ExecutionContext, Strategy, StrategyCore};
use crate::collaborators::LendingLedger;
use crate::error::{Result, StrategyError};
use crate::events::StrategyEvent;
use crate::request::AddTwoSidedParams;
use crate::venue::Venue;
use crate::{log_liquidity, log_swap};
use ethereum_types::U256;
use lyf_amm::units::display_amount;
use lyf_amm::{AmmPool, SwapDirection, SwapSolver};
use std::sync::Arc;
use tracing::debug;

/// Pulls the requested farming token from the position owner through the
/// vault, swaps whichever side is in excess of the pool ratio, and adds
/// everything as liquidity for the worker.
///
/// Swaps at or below the configured dust threshold, or that would buy
/// nothing, are skipped; the router then trims the larger side and the
/// leftover is swept back to the worker as debris.
pub struct AddTwoSidedOptimal {
    core: StrategyCore,
    vault: Arc<dyn LendingLedger>,
}

impl AddTwoSidedOptimal {
    pub fn new(core: StrategyCore, vault: Arc<dyn LendingLedger>) -> Self {
        Self { core, vault }
    }
}

impl Strategy for AddTwoSidedOptimal {
    type Params = AddTwoSidedParams;

    const NAME: &'static str = "AddTwoSidedOptimal";

    fn core(&self) -> &StrategyCore {
        &self.core
    }

    fn run(&self, venue: &mut Venue, ctx: &ExecutionContext, params: Self::Params) -> Result<StrategyEvent> {
        if !params.farming_token_amount.is_zero() {
            self.vault.request_funds(
                venue,
                ctx.farming_token,
                ctx.owner,
                params.farming_token_amount,
                ctx.strategy,
            )?;
        }

        let base_amount = venue.balance_of(ctx.base_token, ctx.strategy);
        let farming_amount = venue.balance_of(ctx.farming_token, ctx.strategy);

        let pool = venue.pool(ctx.lp_token)?;
        let fee = pool.fee();
        let (reserve_base, reserve_farming) = pool.reserves_for(ctx.base_token)?;
        let swap = SwapSolver::optimal_two_sided_swap(
            base_amount,
            farming_amount,
            reserve_base,
            reserve_farming,
            fee,
        )?;

        let (path, reserve_in, reserve_out) = match swap.direction {
            SwapDirection::AToB => (ctx.path_to_farming(), reserve_base, reserve_farming),
            SwapDirection::BToA => (ctx.path_to_base(), reserve_farming, reserve_base),
        };

        let mut executed = None;
        if swap.amount > self.core.settings.dust_threshold {
            let expected_out = pool.view(path[0])?.get_amount_out(swap.amount)?;
            if expected_out.is_zero() {
                debug!(amount = %swap.amount, "Rebalancing swap would buy nothing, skipped");
            } else {
                let impact = describe_impact(swap.amount, reserve_in, reserve_out, fee);
                venue.swap_exact_tokens_for_tokens(ctx.strategy, swap.amount, U256::zero(), &path, ctx.strategy)?;
                log_swap!(
                    "rebalanced {} {:?}, impact {}",
                    display_amount(swap.amount),
                    swap.direction,
                    impact
                );
                executed = Some(swap.direction);
            }
        } else if !swap.is_noop() {
            debug!(amount = %swap.amount, "Rebalancing swap below dust threshold, skipped");
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

        Ok(StrategyEvent::AddTwoSidedOptimal {
            strategy: ctx.strategy,
            worker: ctx.worker,
            tokens: ctx.tokens(),
            base_amount,
            farming_amount,
            swap_amount: if executed.is_some() {
                swap.amount
            } else {
                U256::zero()
            },
            swap_direction: executed,
            lp_minted,
            base_debris,
            farming_debris,
        })
    }
}
