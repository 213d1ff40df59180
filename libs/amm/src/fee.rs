//! Swap fee schedules
//!
//! Every supported DEX charges its fee on the input side of a swap. The
//! schedule stores the *retained* fraction of the input: PancakeSwap V2 keeps
//! 9975/10000 of what is swapped in, Uniswap V2 keeps 997/1000.

use crate::error::{AmmError, Result};
use ethereum_types::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeeSchedule {
    numerator: u32,
    denominator: u32,
}

impl FeeSchedule {
    /// 0.25% (PancakeSwap V2)
    pub const BPS_25: FeeSchedule = FeeSchedule {
        numerator: 9975,
        denominator: 10000,
    };
    /// 0.3% (Uniswap V2, SushiSwap, Mdex default)
    pub const BPS_30: FeeSchedule = FeeSchedule {
        numerator: 997,
        denominator: 1000,
    };
    /// 0.2% (WaultSwap, SpookySwap)
    pub const BPS_20: FeeSchedule = FeeSchedule {
        numerator: 998,
        denominator: 1000,
    };

    pub fn new(numerator: u32, denominator: u32) -> Result<Self> {
        if numerator == 0 || numerator > denominator {
            return Err(AmmError::InvalidFeeSchedule {
                numerator,
                denominator,
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    pub(crate) fn num(&self) -> U256 {
        U256::from(self.numerator)
    }

    pub(crate) fn den(&self) -> U256 {
        U256::from(self.denominator)
    }

    /// Fraction of the input taken as fee, e.g. 0.0025 for PancakeSwap V2
    pub fn fee_rate(&self) -> Decimal {
        Decimal::from(self.denominator - self.numerator) / Decimal::from(self.denominator)
    }

    /// Fee in basis points, rounded to two decimal places
    pub fn fee_bps(&self) -> Decimal {
        (self.fee_rate() * Decimal::from(10_000))
            .round_dp(2)
            .normalize()
    }
}

impl fmt::Display for FeeSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({}bps)", self.numerator, self.denominator, self.fee_bps())
    }
}
