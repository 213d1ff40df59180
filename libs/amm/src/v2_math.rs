//! Uniswap V2 AMM math with exact on-chain rounding
//!
//! Every function reproduces the pair/router contracts' integer arithmetic
//! step for step (same multiplication order, floor division) so an amount
//! computed here is the amount the pool will actually execute.

use crate::checked::CheckedMath;
use crate::error::{AmmError, Result};
use crate::fee::FeeSchedule;
use ethereum_types::U256;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

/// Directional view of a pool: reserves oriented for a swap from `reserve_in`
/// to `reserve_out`, plus the pool's fee schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct V2PoolState {
    pub reserve_in: U256,
    pub reserve_out: U256,
    pub fee: FeeSchedule,
}

/// V2 AMM math functions with zero precision loss
pub struct V2Math;

impl V2Math {
    /// Exact output amount for a constant-product swap
    ///
    /// `floor(amount_in * num * reserve_out / (reserve_in * den + amount_in * num))`
    pub fn get_amount_out(
        amount_in: U256,
        reserve_in: U256,
        reserve_out: U256,
        fee: FeeSchedule,
    ) -> Result<U256> {
        if amount_in.is_zero() {
            return Err(AmmError::InsufficientInputAmount);
        }
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }

        let amount_in_with_fee = amount_in.try_mul(fee.num(), "amount_out.fee")?;
        let numerator = amount_in_with_fee.try_mul(reserve_out, "amount_out.numerator")?;
        let denominator = reserve_in
            .try_mul(fee.den(), "amount_out.denominator")?
            .try_add(amount_in_with_fee, "amount_out.denominator")?;

        numerator.try_div(denominator, "amount_out")
    }

    /// Input required to receive exactly `amount_out` (rounded up by one unit)
    pub fn get_amount_in(
        amount_out: U256,
        reserve_in: U256,
        reserve_out: U256,
        fee: FeeSchedule,
    ) -> Result<U256> {
        if amount_out.is_zero() {
            return Err(AmmError::InsufficientOutputAmount);
        }
        if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
            return Err(AmmError::InsufficientLiquidity);
        }

        let numerator = reserve_in
            .try_mul(amount_out, "amount_in.numerator")?
            .try_mul(fee.den(), "amount_in.numerator")?;
        let denominator = reserve_out
            .try_sub(amount_out, "amount_in.denominator")?
            .try_mul(fee.num(), "amount_in.denominator")?;

        numerator
            .try_div(denominator, "amount_in")?
            .try_add(U256::one(), "amount_in")
    }

    /// Equivalent amount of the other asset at the current reserve ratio
    pub fn quote(amount_a: U256, reserve_a: U256, reserve_b: U256) -> Result<U256> {
        if amount_a.is_zero() {
            return Err(AmmError::InsufficientAmount);
        }
        if reserve_a.is_zero() || reserve_b.is_zero() {
            return Err(AmmError::InsufficientLiquidity);
        }
        amount_a
            .try_mul(reserve_b, "quote")?
            .try_div(reserve_a, "quote")
    }

    /// Walk a multi-hop path forward: `amounts[0] = amount_in`, each following
    /// entry is the output of the corresponding hop
    pub fn get_amounts_out(amount_in: U256, hops: &[V2PoolState]) -> Result<Vec<U256>> {
        if hops.is_empty() {
            return Err(AmmError::InvalidPath);
        }
        let mut amounts = Vec::with_capacity(hops.len() + 1);
        amounts.push(amount_in);
        let mut current = amount_in;
        for hop in hops {
            current = Self::get_amount_out(current, hop.reserve_in, hop.reserve_out, hop.fee)?;
            amounts.push(current);
        }
        Ok(amounts)
    }

    /// Walk a multi-hop path backward from the desired final output
    pub fn get_amounts_in(amount_out: U256, hops: &[V2PoolState]) -> Result<Vec<U256>> {
        if hops.is_empty() {
            return Err(AmmError::InvalidPath);
        }
        let mut amounts = vec![U256::zero(); hops.len() + 1];
        amounts[hops.len()] = amount_out;
        for (i, hop) in hops.iter().enumerate().rev() {
            amounts[i] = Self::get_amount_in(amounts[i + 1], hop.reserve_in, hop.reserve_out, hop.fee)?;
        }
        Ok(amounts)
    }

    /// Price impact of a trade as a percentage of the pre-trade spot price
    pub fn price_impact(
        amount_in: U256,
        reserve_in: U256,
        reserve_out: U256,
        fee: FeeSchedule,
    ) -> Result<Decimal> {
        let amount_out = Self::get_amount_out(amount_in, reserve_in, reserve_out, fee)?;

        let r_in = to_decimal(reserve_in)?;
        let r_out = to_decimal(reserve_out)?;
        let price_before = r_out / r_in;
        let price_executed = to_decimal(amount_out)? / to_decimal(amount_in)?;

        Ok((price_before - price_executed).abs() / price_before * dec!(100))
    }
}

fn to_decimal(value: U256) -> Result<Decimal> {
    Decimal::from_str(&value.to_string()).map_err(|_| AmmError::Overflow("decimal conversion"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e18(n: u64) -> U256 {
        U256::from(n) * U256::exp10(18)
    }

    #[test]
    fn test_v2_output_calculation() {
        // 100 in, 1000:2000 reserves, 0.3% fee → floor(99700*2000/1099700)
        let out = V2Math::get_amount_out(
            U256::from(100),
            U256::from(1000),
            U256::from(2000),
            FeeSchedule::BPS_30,
        )
        .unwrap();
        assert_eq!(out, U256::from(181));
    }

    #[test]
    fn test_amount_in_covers_requested_output() {
        let (r_in, r_out) = (e18(15), e18(100));
        let want = e18(1);
        let needed = V2Math::get_amount_in(want, r_in, r_out, FeeSchedule::BPS_25).unwrap();
        let got = V2Math::get_amount_out(needed, r_in, r_out, FeeSchedule::BPS_25).unwrap();
        assert!(got >= want);
        let short = V2Math::get_amount_out(needed - 1, r_in, r_out, FeeSchedule::BPS_25).unwrap();
        assert!(short <= want);
    }

    #[test]
    fn test_amount_in_rejects_draining_reserve() {
        let err = V2Math::get_amount_in(e18(2), e18(1), e18(2), FeeSchedule::BPS_25).unwrap_err();
        assert_eq!(err, AmmError::InsufficientLiquidity);
    }

    #[test]
    fn test_zero_inputs_rejected() {
        assert_eq!(
            V2Math::get_amount_out(U256::zero(), e18(1), e18(1), FeeSchedule::BPS_30),
            Err(AmmError::InsufficientInputAmount)
        );
        assert_eq!(
            V2Math::get_amount_out(U256::one(), U256::zero(), e18(1), FeeSchedule::BPS_30),
            Err(AmmError::InsufficientLiquidity)
        );
        assert_eq!(
            V2Math::quote(U256::zero(), e18(1), e18(1)),
            Err(AmmError::InsufficientAmount)
        );
    }

    #[test]
    fn test_multi_hop_walk() {
        let hops = [
            V2PoolState {
                reserve_in: e18(10),
                reserve_out: e18(20),
                fee: FeeSchedule::BPS_30,
            },
            V2PoolState {
                reserve_in: e18(40),
                reserve_out: e18(5),
                fee: FeeSchedule::BPS_25,
            },
        ];
        let amounts = V2Math::get_amounts_out(e18(1), &hops).unwrap();
        assert_eq!(amounts.len(), 3);
        let first = V2Math::get_amount_out(e18(1), e18(10), e18(20), FeeSchedule::BPS_30).unwrap();
        assert_eq!(amounts[1], first);

        let back = V2Math::get_amounts_in(amounts[2], &hops).unwrap();
        assert!(back[0] <= e18(1) + U256::from(2));
        assert!(V2Math::get_amounts_out(e18(1), &[]).is_err());
    }

    #[test]
    fn test_price_impact() {
        let impact =
            V2Math::price_impact(U256::from(100), U256::from(1000), U256::from(2000), FeeSchedule::BPS_30)
                .unwrap();
        assert!(impact > dec!(0));
        assert!(impact < dec!(20));
    }
}
