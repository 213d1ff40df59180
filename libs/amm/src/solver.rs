//! Closed-form optimal swap amounts for zero-dust liquidity provision
//!
//! Depositing into a constant-product pool requires both assets in the pool's
//! ratio. When a position holds the assets in some other proportion, part of
//! the excess asset is swapped first. Because the swap itself moves the pool
//! price and pays a fee, the amount is the root of a quadratic derived from the
//! fee-adjusted invariant. With `n/d` the retained fee fraction:
//!
//! One-sided (only `a` of asset X, reserve `r` of X):
//! `n·s² + (n+d)·r·s − d·r·a = 0`
//! `s = (√(r·(4·n·d·a + (n+d)²·r)) − (n+d)·r) / 2n`
//!
//! Two-sided (amounts `x`, `y`; reserves `X`, `Y`; X in excess):
//! `b = (n+d)·X`, `c = (x·Y − y·X)·d / (y + Y) · X`
//! `s = (√(b² + 4·n·c) − b) / 2n`

use crate::checked::CheckedMath;
use crate::error::{AmmError, Result};
use crate::fee::FeeSchedule;
use ethereum_types::U256;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Which asset of a two-asset holding is swapped into the other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapDirection {
    AToB,
    BToA,
}

/// Result of the two-sided solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimalSwap {
    pub amount: U256,
    pub direction: SwapDirection,
}

impl OptimalSwap {
    fn balanced() -> Self {
        Self {
            amount: U256::zero(),
            direction: SwapDirection::AToB,
        }
    }

    /// True when the holding already matches the pool ratio
    pub fn is_noop(&self) -> bool {
        self.amount.is_zero()
    }
}

pub struct SwapSolver;

impl SwapSolver {
    /// Integer square root, floor semantics (Babylonian iteration)
    pub fn isqrt(y: U256) -> U256 {
        if y > U256::from(3) {
            let mut z = y;
            let mut x = y / 2 + 1;
            while x < z {
                z = x;
                x = (y / x + x) / 2;
            }
            z
        } else if !y.is_zero() {
            U256::one()
        } else {
            U256::zero()
        }
    }

    /// Amount of a single deposited asset to swap so that the remainder and
    /// the swap output match the post-swap pool ratio exactly
    pub fn optimal_one_sided_swap(
        amount_in: U256,
        reserve_in: U256,
        fee: FeeSchedule,
    ) -> Result<U256> {
        if reserve_in.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        if amount_in.is_zero() {
            return Ok(U256::zero());
        }

        let n = fee.num();
        let d = fee.den();
        let n_plus_d = n.try_add(d, "one_sided.n_plus_d")?;

        // r * (a * 4nd + r * (n+d)^2)
        let four_nd = U256::from(4).try_mul(n, "one_sided.4nd")?.try_mul(d, "one_sided.4nd")?;
        let linear = amount_in.try_mul(four_nd, "one_sided.linear")?;
        let square = reserve_in
            .try_mul(n_plus_d, "one_sided.square")?
            .try_mul(n_plus_d, "one_sided.square")?;
        let radicand = reserve_in.try_mul(linear.try_add(square, "one_sided.sum")?, "one_sided.radicand")?;

        let root = Self::isqrt(radicand);
        let b = reserve_in.try_mul(n_plus_d, "one_sided.b")?;
        let swap = root
            .try_sub(b, "one_sided.numerator")?
            .try_div(n.try_mul(U256::from(2), "one_sided.2n")?, "one_sided")?;

        if swap > amount_in {
            return Err(AmmError::SolverOutOfRange {
                root: swap,
                amount_in,
            });
        }

        trace!(%amount_in, %reserve_in, %swap, "one-sided optimal swap");
        Ok(swap)
    }

    /// Determine which asset is in excess versus the pool ratio and how much
    /// of it to swap before adding liquidity with zero leftover
    pub fn optimal_two_sided_swap(
        amount_a: U256,
        amount_b: U256,
        reserve_a: U256,
        reserve_b: U256,
        fee: FeeSchedule,
    ) -> Result<OptimalSwap> {
        if reserve_a.is_zero() || reserve_b.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }

        let weight_a = amount_a.try_mul(reserve_b, "two_sided.weight_a")?;
        let weight_b = amount_b.try_mul(reserve_a, "two_sided.weight_b")?;

        let result = if weight_a == weight_b {
            OptimalSwap::balanced()
        } else if weight_a > weight_b {
            OptimalSwap {
                amount: Self::excess_swap(amount_a, amount_b, reserve_a, reserve_b, fee)?,
                direction: SwapDirection::AToB,
            }
        } else {
            OptimalSwap {
                amount: Self::excess_swap(amount_b, amount_a, reserve_b, reserve_a, fee)?,
                direction: SwapDirection::BToA,
            }
        };

        trace!(
            %amount_a, %amount_b, %reserve_a, %reserve_b,
            swap = %result.amount, direction = ?result.direction,
            "two-sided optimal swap"
        );
        Ok(result)
    }

    /// Swap amount of the excess asset X, given `amt_x * res_y > amt_y * res_x`
    fn excess_swap(
        amt_x: U256,
        amt_y: U256,
        res_x: U256,
        res_y: U256,
        fee: FeeSchedule,
    ) -> Result<U256> {
        let n = fee.num();
        let d = fee.den();

        let b = n
            .try_add(d, "two_sided.b")?
            .try_mul(res_x, "two_sided.b")?;
        let excess = amt_x
            .try_mul(res_y, "two_sided.excess")?
            .try_sub(amt_y.try_mul(res_x, "two_sided.excess")?, "two_sided.excess")?;
        let c = excess
            .try_mul(d, "two_sided.c")?
            .try_div(amt_y.try_add(res_y, "two_sided.c")?, "two_sided.c")?
            .try_mul(res_x, "two_sided.c")?;
        let four_ac = U256::from(4)
            .try_mul(n, "two_sided.4ac")?
            .try_mul(c, "two_sided.4ac")?;

        let root = Self::isqrt(b.try_mul(b, "two_sided.b2")?.try_add(four_ac, "two_sided.disc")?);
        let swap = root
            .try_sub(b, "two_sided.numerator")?
            .try_div(n.try_mul(U256::from(2), "two_sided.2n")?, "two_sided")?;

        if swap > amt_x {
            return Err(AmmError::SolverOutOfRange {
                root: swap,
                amount_in: amt_x,
            });
        }
        Ok(swap)
    }
}
