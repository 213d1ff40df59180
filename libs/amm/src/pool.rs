//! Constant-product pair state
//!
//! Mirrors a UniswapV2-style pair: sorted tokens, `uint112` reserves, LP share
//! supply with a permanently locked minimum, and the fee-adjusted `K` check on
//! every swap. Token custody is tracked by the caller; this type only owns the
//! accounting the pair contract itself would hold.

use crate::checked::CheckedMath;
use crate::error::{AmmError, Result};
use crate::fee::FeeSchedule;
use crate::pool_traits::PoolType;
use crate::solver::SwapSolver;
use crate::v2_math::V2PoolState;
use ethereum_types::{Address, U256, U512};
use serde::{Deserialize, Serialize};

/// Shares locked forever on the first mint
pub const MINIMUM_LIQUIDITY: u64 = 1000;

/// Largest reserve a pair can hold (`uint112`)
pub fn max_reserve() -> U256 {
    (U256::one() << 112) - U256::one()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantProductPool {
    pub address: Address,
    pub token0: Address,
    pub token1: Address,
    reserve0: U256,
    reserve1: U256,
    total_shares: U256,
    fee: FeeSchedule,
    pool_type: PoolType,
}

impl ConstantProductPool {
    pub fn new(
        address: Address,
        token_a: Address,
        token_b: Address,
        fee: FeeSchedule,
        pool_type: PoolType,
    ) -> Result<Self> {
        if token_a == token_b {
            return Err(AmmError::IdenticalTokens(token_a));
        }
        let (token0, token1) = sort_tokens(token_a, token_b);
        Ok(Self {
            address,
            token0,
            token1,
            reserve0: U256::zero(),
            reserve1: U256::zero(),
            total_shares: U256::zero(),
            fee,
            pool_type,
        })
    }

    pub fn reserves(&self) -> (U256, U256) {
        (self.reserve0, self.reserve1)
    }

    pub fn total_shares(&self) -> U256 {
        self.total_shares
    }

    pub fn fee(&self) -> FeeSchedule {
        self.fee
    }

    pub fn pool_type(&self) -> PoolType {
        self.pool_type
    }

    pub fn contains(&self, token: Address) -> bool {
        token == self.token0 || token == self.token1
    }

    /// Token on the other side of `token`
    pub fn counterpart(&self, token: Address) -> Result<Address> {
        if token == self.token0 {
            Ok(self.token1)
        } else if token == self.token1 {
            Ok(self.token0)
        } else {
            Err(self.not_in_pool(token))
        }
    }

    /// Reserves oriented as `(reserve of token, reserve of counterpart)`
    pub fn reserves_for(&self, token: Address) -> Result<(U256, U256)> {
        if token == self.token0 {
            Ok((self.reserve0, self.reserve1))
        } else if token == self.token1 {
            Ok((self.reserve1, self.reserve0))
        } else {
            Err(self.not_in_pool(token))
        }
    }

    /// Directional view for swapping `token_in` into its counterpart
    pub fn view(&self, token_in: Address) -> Result<V2PoolState> {
        let (reserve_in, reserve_out) = self.reserves_for(token_in)?;
        Ok(V2PoolState {
            reserve_in,
            reserve_out,
            fee: self.fee,
        })
    }

    /// Mint shares for amounts already delivered to the pair, ordered as
    /// `(token0, token1)`. Returns `(minted, locked)`; `locked` is non-zero
    /// only on the first mint.
    pub fn mint(&mut self, amount0: U256, amount1: U256) -> Result<(U256, U256)> {
        let (liquidity, locked) = if self.total_shares.is_zero() {
            let root = SwapSolver::isqrt(amount0.try_mul(amount1, "mint.product")?);
            let locked = U256::from(MINIMUM_LIQUIDITY);
            let liquidity = root
                .checked_sub(locked)
                .ok_or(AmmError::InsufficientLiquidityMinted)?;
            (liquidity, locked)
        } else {
            let by0 = amount0
                .try_mul(self.total_shares, "mint.share0")?
                .try_div(self.reserve0, "mint.share0")?;
            let by1 = amount1
                .try_mul(self.total_shares, "mint.share1")?
                .try_div(self.reserve1, "mint.share1")?;
            (by0.min(by1), U256::zero())
        };

        if liquidity.is_zero() {
            return Err(AmmError::InsufficientLiquidityMinted);
        }

        let reserve0 = self.reserve0.try_add(amount0, "mint.reserve0")?;
        let reserve1 = self.reserve1.try_add(amount1, "mint.reserve1")?;
        check_reserve_bounds(reserve0, reserve1)?;

        self.reserve0 = reserve0;
        self.reserve1 = reserve1;
        self.total_shares = self
            .total_shares
            .try_add(liquidity, "mint.supply")?
            .try_add(locked, "mint.supply")?;
        Ok((liquidity, locked))
    }

    /// Burn `shares` and return the pro-rata `(amount0, amount1)`
    pub fn burn(&mut self, shares: U256) -> Result<(U256, U256)> {
        if shares.is_zero() || shares > self.total_shares {
            return Err(AmmError::InsufficientLiquidityBurned);
        }
        let amount0 = shares
            .try_mul(self.reserve0, "burn.amount0")?
            .try_div(self.total_shares, "burn.amount0")?;
        let amount1 = shares
            .try_mul(self.reserve1, "burn.amount1")?
            .try_div(self.total_shares, "burn.amount1")?;
        if amount0.is_zero() || amount1.is_zero() {
            return Err(AmmError::InsufficientLiquidityBurned);
        }

        self.reserve0 = self.reserve0.try_sub(amount0, "burn.reserve0")?;
        self.reserve1 = self.reserve1.try_sub(amount1, "burn.reserve1")?;
        self.total_shares = self.total_shares.try_sub(shares, "burn.supply")?;
        Ok((amount0, amount1))
    }

    /// Apply a swap of `amount_in` of `token_in` for `amount_out` of the
    /// counterpart, enforcing the fee-adjusted constant-product check
    pub fn swap(&mut self, token_in: Address, amount_in: U256, amount_out: U256) -> Result<()> {
        if amount_out.is_zero() {
            return Err(AmmError::InsufficientOutputAmount);
        }
        if amount_in.is_zero() {
            return Err(AmmError::InsufficientInputAmount);
        }
        let (reserve_in, reserve_out) = self.reserves_for(token_in)?;
        if amount_out >= reserve_out {
            return Err(AmmError::InsufficientLiquidity);
        }

        let balance_in = reserve_in.try_add(amount_in, "swap.balance_in")?;
        let balance_out = reserve_out.try_sub(amount_out, "swap.balance_out")?;

        // balance_in * den - amount_in * (den - num) keeps only the retained part
        let den = self.fee.den();
        let fee_part = den.try_sub(self.fee.num(), "swap.fee")?;
        let adjusted_in = balance_in
            .try_mul(den, "swap.adjusted_in")?
            .try_sub(amount_in.try_mul(fee_part, "swap.adjusted_in")?, "swap.adjusted_in")?;
        let adjusted_out = balance_out.try_mul(den, "swap.adjusted_out")?;

        let k_after = adjusted_in.full_mul(adjusted_out);
        let k_before = reserve_in
            .full_mul(reserve_out)
            .checked_mul(U512::from(den).checked_mul(U512::from(den)).ok_or(AmmError::Overflow("swap.k"))?)
            .ok_or(AmmError::Overflow("swap.k"))?;
        if k_after < k_before {
            return Err(AmmError::KInvariantViolated);
        }

        let (reserve0, reserve1) = if token_in == self.token0 {
            (balance_in, balance_out)
        } else {
            (balance_out, balance_in)
        };
        check_reserve_bounds(reserve0, reserve1)?;
        self.reserve0 = reserve0;
        self.reserve1 = reserve1;
        Ok(())
    }

    /// Current product of reserves
    pub fn k(&self) -> U512 {
        self.reserve0.full_mul(self.reserve1)
    }

    fn not_in_pool(&self, token: Address) -> AmmError {
        AmmError::TokenNotInPool {
            token,
            pool: self.address,
        }
    }
}

/// Order two token addresses the way pair factories do
pub fn sort_tokens(token_a: Address, token_b: Address) -> (Address, Address) {
    if token_a < token_b {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    }
}

fn check_reserve_bounds(reserve0: U256, reserve1: U256) -> Result<()> {
    let max = max_reserve();
    if reserve0 > max || reserve1 > max {
        return Err(AmmError::Overflow("reserve exceeds uint112"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::v2_math::V2Math;

    fn e18(n: u64) -> U256 {
        U256::from(n) * U256::exp10(18)
    }

    fn pool() -> ConstantProductPool {
        ConstantProductPool::new(
            Address::from_low_u64_be(0xaa),
            Address::from_low_u64_be(0x2),
            Address::from_low_u64_be(0x1),
            FeeSchedule::BPS_25,
            PoolType::PancakeSwapV2,
        )
        .unwrap()
    }

    #[test]
    fn test_tokens_sorted_and_first_mint_locks_minimum() {
        let mut p = pool();
        assert_eq!(p.token0, Address::from_low_u64_be(0x1));
        let (minted, locked) = p.mint(e18(1), e18(1) / 10).unwrap();
        assert_eq!(locked, U256::from(MINIMUM_LIQUIDITY));
        assert_eq!(minted, U256::from(316_227_766_016_836_933u64));
        assert_eq!(p.total_shares(), U256::from(316_227_766_016_837_933u64));
    }

    #[test]
    fn test_burn_is_pro_rata() {
        let mut p = pool();
        p.mint(e18(1), e18(1) / 10).unwrap();
        let (minted, _) = p.mint(e18(1) / 2, e18(1) / 20).unwrap();
        let (a0, a1) = p.burn(minted).unwrap();
        assert!(a0 <= e18(1) / 2 && a1 <= e18(1) / 20);
        assert!(p.burn(U256::zero()).is_err());
        assert!(p.burn(p.total_shares() + 1).is_err());
    }

    #[test]
    fn test_swap_enforces_k_and_grows_it() {
        let mut p = pool();
        p.mint(e18(10), e18(10)).unwrap();
        let token_in = p.token0;
        let view = p.view(token_in).unwrap();
        let out = V2Math::get_amount_out(e18(1), view.reserve_in, view.reserve_out, view.fee).unwrap();

        let k_before = p.k();
        let mut greedy = p.clone();
        assert_eq!(
            greedy.swap(token_in, e18(1), out + 1),
            Err(AmmError::KInvariantViolated)
        );

        p.swap(token_in, e18(1), out).unwrap();
        assert!(p.k() > k_before);
        assert!(p.swap(Address::from_low_u64_be(0x99), e18(1), U256::one()).is_err());
    }
}
