//! Liquidity strategies
//!
//! Each strategy is a stateless contract a position manager calls with the
//! tokens it wants worked on. The shared entry point
//! [`Strategy::execute`] checks the caller against the allow-list, decodes the
//! parameter blob, and runs the worker's hand-off plus the strategy body inside
//! an atomic venue scope guarded by a [`CustodyGuard`]. Either every token ends
//! up with the worker or the position owner, or the whole call is rolled back
//! and the hand-off never left the worker.

mod add_single_sided;
mod add_two_sided;
mod liquidate;
mod partial_close_liquidate;
mod partial_close_minimize;
mod withdraw_minimize;

pub use add_single_sided::AddSingleSidedOptimal;
pub use add_two_sided::AddTwoSidedOptimal;
pub use liquidate::Liquidate;
pub use partial_close_liquidate::PartialCloseLiquidate;
pub use partial_close_minimize::PartialCloseMinimizeTrading;
pub use withdraw_minimize::WithdrawMinimizeTrading;

use crate::access::SharedAllowList;
use crate::collaborators::{PositionManager, TokenAmount};
use crate::error::{Result, StrategyError};
use crate::events::{PositionTokens, StrategyEvent};
use crate::guard::CustodyGuard;
use crate::request::StrategyParams;
use crate::settings::StrategySettings;
use crate::venue::Venue;
use crate::{log_access, log_error, log_repay, log_success, log_swap};
use ethereum_types::{Address, U256};
use lyf_amm::units::display_amount;
use lyf_amm::{AmmError, AmmPool, FeeSchedule, V2Math};

/// State shared by every strategy: its own address, the caller allow-list and
/// tuning from configuration
#[derive(Debug, Clone)]
pub struct StrategyCore {
    pub address: Address,
    pub gate: SharedAllowList,
    pub settings: StrategySettings,
}

impl StrategyCore {
    pub fn new(address: Address, gate: SharedAllowList, settings: StrategySettings) -> Self {
        Self {
            address,
            gate,
            settings,
        }
    }
}

/// Everything a strategy body needs to know about the call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionContext {
    pub strategy: Address,
    pub worker: Address,
    pub owner: Address,
    pub debt: U256,
    pub base_token: Address,
    pub farming_token: Address,
    /// Pair of base and farming token, also the LP token address
    pub lp_token: Address,
}

impl ExecutionContext {
    pub fn tokens(&self) -> PositionTokens {
        PositionTokens {
            base_token: self.base_token,
            farming_token: self.farming_token,
            lp_token: self.lp_token,
        }
    }

    pub fn path_to_base(&self) -> [Address; 2] {
        [self.farming_token, self.base_token]
    }

    pub fn path_to_farming(&self) -> [Address; 2] {
        [self.base_token, self.farming_token]
    }
}

pub trait Strategy {
    type Params: StrategyParams;

    const NAME: &'static str;

    fn core(&self) -> &StrategyCore;

    /// Strategy body. Runs inside an atomic scope; any error reverts the call.
    fn run(&self, venue: &mut Venue, ctx: &ExecutionContext, params: Self::Params) -> Result<StrategyEvent>;

    fn address(&self) -> Address {
        self.core().address
    }

    /// Execute on behalf of `worker` for the position of `owner` carrying
    /// `debt`. The `handoff` moves from the worker to the strategy inside the
    /// same atomic scope, so a reverted call returns it to the worker.
    fn execute(
        &self,
        venue: &mut Venue,
        worker: &dyn PositionManager,
        handoff: &[TokenAmount],
        owner: Address,
        debt: U256,
        data: &[u8],
    ) -> Result<()> {
        let core = self.core();
        if let Err(err) = core.gate.read().ensure_allowed(worker.address()) {
            log_access!("{} rejected caller {:?}", Self::NAME, worker.address());
            return Err(err);
        }
        let params = Self::Params::decode(data)?;
        let lp_token = venue.pair_for(worker.base_token(), worker.farming_token())?;

        let ctx = ExecutionContext {
            strategy: core.address,
            worker: worker.address(),
            owner,
            debt,
            base_token: worker.base_token(),
            farming_token: worker.farming_token(),
            lp_token,
        };
        let custody = [ctx.base_token, ctx.farming_token, ctx.lp_token];
        let guard = CustodyGuard::enter(venue, ctx.strategy, custody)?;

        let outcome: Result<()> = venue.atomic(|venue| {
            for deposit in handoff {
                if !guard.covers(deposit.token) {
                    return Err(StrategyError::UnexpectedToken(deposit.token));
                }
                venue.transfer(deposit.token, ctx.worker, ctx.strategy, deposit.amount)?;
            }
            let event = self.run(venue, &ctx, params)?;
            guard.settle(venue)?;
            venue.emit(event);
            Ok(())
        });

        match &outcome {
            Ok(()) => log_success!("{} completed for worker {:?}", Self::NAME, ctx.worker),
            Err(err) => log_error!("{} reverted ({}): {}", Self::NAME, err.class(), err),
        }
        guard.settle(venue)?;
        outcome
    }

    /// Allow or deny position managers. Owner only; one event per caller.
    fn set_workers_ok(&self, venue: &mut Venue, sender: Address, workers: &[Address], ok: bool) -> Result<()> {
        let core = self.core();
        core.gate.write().set_callers_ok(sender, workers, ok)?;
        for worker in workers {
            venue.emit(StrategyEvent::CallerSet {
                strategy: core.address,
                caller: *worker,
                ok,
            });
        }
        Ok(())
    }

    fn transfer_ownership(&self, venue: &mut Venue, sender: Address, new_owner: Address) -> Result<()> {
        let core = self.core();
        core.gate.write().transfer_ownership(sender, new_owner)?;
        venue.emit(StrategyEvent::OwnershipTransferred {
            strategy: core.address,
            previous_owner: sender,
            new_owner,
        });
        Ok(())
    }
}

/// Send the strategy's whole balance of `token` to `to`
pub(crate) fn sweep(venue: &mut Venue, ctx: &ExecutionContext, token: Address, to: Address) -> Result<U256> {
    let amount = venue.balance_of(token, ctx.strategy);
    venue.transfer(token, ctx.strategy, to, amount)?;
    Ok(amount)
}

/// Remove `lp` liquidity into the strategy, returning `(base, farming)`
pub(crate) fn remove_to_strategy(venue: &mut Venue, ctx: &ExecutionContext, lp: U256) -> Result<(U256, U256)> {
    venue.remove_liquidity(
        ctx.strategy,
        ctx.base_token,
        ctx.farming_token,
        lp,
        U256::zero(),
        U256::zero(),
        ctx.strategy,
    )
}

/// Swap all farming token the strategy holds into base
pub(crate) fn swap_all_farming(venue: &mut Venue, ctx: &ExecutionContext) -> Result<U256> {
    let farming = venue.balance_of(ctx.farming_token, ctx.strategy);
    if farming.is_zero() {
        return Ok(U256::zero());
    }
    venue.swap_exact_tokens_for_tokens(ctx.strategy, farming, U256::zero(), &ctx.path_to_base(), ctx.strategy)?;
    log_swap!("sold {} farming for base", display_amount(farming));
    Ok(farming)
}

/// Buy exactly `deficit` base with farming token. Fails with
/// `ArithmeticUnderflow` when the farming balance, or the pool, cannot cover it.
pub(crate) fn cover_deficit(venue: &mut Venue, ctx: &ExecutionContext, deficit: U256) -> Result<U256> {
    if deficit.is_zero() {
        return Ok(U256::zero());
    }
    let farming_available = venue.balance_of(ctx.farming_token, ctx.strategy);
    let underflow = StrategyError::ArithmeticUnderflow {
        deficit,
        farming_available,
    };

    let view = venue.pool(ctx.lp_token)?.view(ctx.farming_token)?;
    let needed = match view.get_amount_in(deficit) {
        Ok(needed) => needed,
        Err(AmmError::InsufficientLiquidity) => return Err(underflow),
        Err(err) => return Err(err.into()),
    };
    if needed > farming_available {
        return Err(underflow);
    }

    venue.swap_tokens_for_exact_tokens(ctx.strategy, deficit, farming_available, &ctx.path_to_base(), ctx.strategy)?;
    log_repay!(
        "covered base deficit {} with {} farming",
        display_amount(deficit),
        display_amount(needed)
    );
    Ok(needed)
}

/// Price impact of a planned swap for logs; never fails the call
pub(crate) fn describe_impact(amount_in: U256, reserve_in: U256, reserve_out: U256, fee: FeeSchedule) -> String {
    V2Math::price_impact(amount_in, reserve_in, reserve_out, fee)
        .map(|impact| format!("{}%", impact.round_dp(4)))
        .unwrap_or_else(|_| "n/a".to_string())
}
