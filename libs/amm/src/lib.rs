//! # LYF AMM Library - Constant-Product Pool Math for Leveraged Farming
//!
//! ## Purpose
//!
//! Exact integer mathematics for the constant-product pools that leveraged
//! positions are deployed into. Reproduces the pair and router contracts'
//! rounding bit for bit so that an amount computed off the hot path is the
//! amount the pool executes, and solves the closed-form "optimal swap" problems
//! the liquidity strategies need to enter a pool with zero leftover.
//!
//! ## Integration Points
//!
//! - **Input Sources**: Pool reserves and fee schedules held by the strategy venue
//! - **Output Destinations**: Liquidity strategies (add, withdraw, partial close)
//! - **Protocol Support**: PancakeSwap V2, Uniswap V2, SushiSwap, WaultSwap,
//!   SpookySwap, Mdex (per-pair fees)
//! - **Precision**: `U256` amounts in native token units, checked arithmetic
//!   everywhere, `U512` for the invariant check
//!
//! ## Architecture Role
//!
//! ```text
//! FeeSchedule ─┐
//!              ├─► V2Math (swap in/out, quote, reserve walk)
//! Reserves  ───┤
//!              └─► SwapSolver (isqrt, one-sided, two-sided optimal swap)
//!                        │
//! ConstantProductPool ◄──┘  mint / burn / swap with K check
//! ```
//!
//! All functions are pure: identical inputs always give identical outputs.

pub mod checked;
pub mod error;
pub mod fee;
pub mod pool;
pub mod pool_traits;
pub mod solver;
pub mod units;
pub mod v2_math;

pub use error::{AmmError, Result};
pub use fee::FeeSchedule;
pub use pool::{sort_tokens, ConstantProductPool, MINIMUM_LIQUIDITY};
pub use pool_traits::{AmmPool, PoolType};
pub use solver::{OptimalSwap, SwapDirection, SwapSolver};
pub use v2_math::{V2Math, V2PoolState};

/// Common types for AMM calculations
pub use ethereum_types::{Address, U256};
pub use rust_decimal::Decimal;
