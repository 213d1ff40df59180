//! # LYF Strategies - Liquidity Strategies for Leveraged Yield Farming
//!
//! ## Purpose
//!
//! Stateless strategies a position manager (worker) calls to open, grow,
//! reduce or close a leveraged liquidity position. The worker hands over the
//! tokens it wants worked on as part of the call, names the position owner and
//! its debt, and passes an ABI-encoded parameter blob. The strategy swaps and
//! adds or removes liquidity on the venue's constant-product pairs, then hands
//! every token back: LP and base token to the worker, surplus farming token to
//! the owner.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Worker calls with an allowed caller address, vault
//!   pulls for two-sided adds
//! - **Output Destinations**: Token balances and the event log of [`Venue`]
//! - **Pool Math**: `lyf-amm` for router rounding and optimal swap sizing
//! - **Configuration**: `lyf-config` for the dust threshold, fee overrides and logging
//!
//! ## Architecture Role
//!
//! ```text
//! Worker ──► Strategy::execute ──► CallerAllowList ──► StrategyParams::decode
//!                  │
//!                  ▼
//!          Venue::atomic ──► strategy body (swap / add / remove) ──► CustodyGuard
//!                  │
//!                  ▼
//!          StrategyEvent log, tokens back to worker and owner
//! ```
//!
//! ## Strategies
//!
//! - [`AddSingleSidedOptimal`]: base token only, one optimally sized swap
//! - [`AddTwoSidedOptimal`]: base plus farming token, rebalanced in one swap
//! - [`WithdrawMinimizeTrading`]: full close, sells farming only to cover debt
//! - [`PartialCloseLiquidate`]: partial close, sells all farming received
//! - [`PartialCloseMinimizeTrading`]: partial close, sells only what repayment needs
//! - [`Liquidate`]: full close into base token
//!
//! Any failure reverts the whole call; see [`StrategyError::class`] for how
//! failures are grouped.

pub mod access;
pub mod collaborators;
pub mod error;
pub mod events;
pub mod guard;
pub mod ledger;
pub mod logging;
pub mod request;
pub mod settings;
pub mod strategies;
pub mod venue;

pub use access::{CallerAllowList, CallerState, SharedAllowList};
pub use collaborators::{LendingLedger, PositionManager, TokenAmount, VaultFunding, WorkerHandle};
pub use error::{ErrorClass, Result, StrategyError};
pub use events::{PositionTokens, StrategyEvent};
pub use guard::CustodyGuard;
pub use request::{
    AddSingleSidedParams, AddTwoSidedParams, LiquidateParams, PartialCloseLiquidateParams,
    PartialCloseMinimizeTradingParams, StrategyParams, WithdrawMinimizeTradingParams,
};
pub use settings::StrategySettings;
pub use strategies::{
    AddSingleSidedOptimal, AddTwoSidedOptimal, ExecutionContext, Liquidate, PartialCloseLiquidate,
    PartialCloseMinimizeTrading, Strategy, StrategyCore, WithdrawMinimizeTrading,
};
pub use venue::Venue;
