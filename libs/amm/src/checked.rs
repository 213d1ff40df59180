//! Checked `U256` arithmetic that reports failures as [`AmmError`]
//!
//! Pool contracts revert on overflow; every multiplication and subtraction in
//! the swap math goes through these helpers so the Rust side fails the same way
//! instead of panicking.

use crate::error::{AmmError, Result};
use ethereum_types::U256;

pub trait CheckedMath: Sized {
    fn try_add(self, rhs: Self, ctx: &'static str) -> Result<Self>;
    fn try_sub(self, rhs: Self, ctx: &'static str) -> Result<Self>;
    fn try_mul(self, rhs: Self, ctx: &'static str) -> Result<Self>;
    fn try_div(self, rhs: Self, ctx: &'static str) -> Result<Self>;
}

impl CheckedMath for U256 {
    #[inline]
    fn try_add(self, rhs: Self, ctx: &'static str) -> Result<Self> {
        self.checked_add(rhs).ok_or(AmmError::Overflow(ctx))
    }

    #[inline]
    fn try_sub(self, rhs: Self, ctx: &'static str) -> Result<Self> {
        self.checked_sub(rhs).ok_or(AmmError::Underflow(ctx))
    }

    #[inline]
    fn try_mul(self, rhs: Self, ctx: &'static str) -> Result<Self> {
        self.checked_mul(rhs).ok_or(AmmError::Overflow(ctx))
    }

    #[inline]
    fn try_div(self, rhs: Self, ctx: &'static str) -> Result<Self> {
        if rhs.is_zero() {
            return Err(AmmError::DivisionByZero(ctx));
        }
        Ok(self / rhs)
    }
}
