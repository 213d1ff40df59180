//! Strategy parameter blobs
//!
//! Position managers pass strategy arguments as ABI-encoded tuples of static
//! `uint256` words. Each strategy has a typed parameter struct with a fixed
//! field count; a blob whose length or content does not match that schema is
//! rejected before any token moves.

use crate::error::{Result, StrategyError};
use ethabi::{ParamType, Token};
use ethereum_types::U256;
use tracing::debug;

const WORD: usize = 32;

pub trait StrategyParams: Sized {
    /// Field names in encoding order
    const FIELDS: &'static [&'static str];

    fn from_words(words: &[U256]) -> Option<Self>;

    fn to_words(&self) -> Vec<U256>;

    /// Strictly decode an ABI blob of `FIELDS.len()` uint256 words
    fn decode(data: &[u8]) -> Result<Self> {
        let expected = Self::FIELDS.len() * WORD;
        if data.len() != expected {
            debug!(params = %hex::encode(data), "Rejected strategy params");
            return Err(StrategyError::MalformedParams(format!(
                "expected {} bytes ({}), got {}",
                expected,
                Self::FIELDS.join(", "),
                data.len()
            )));
        }

        let types = vec![ParamType::Uint(256); Self::FIELDS.len()];
        let tokens = ethabi::decode(&types, data)
            .map_err(|e| StrategyError::MalformedParams(e.to_string()))?;

        let words = tokens
            .into_iter()
            .zip(Self::FIELDS)
            .map(|(token, field)| {
                token
                    .into_uint()
                    .ok_or_else(|| StrategyError::MalformedParams(format!("{field} is not a uint256")))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_words(&words)
            .ok_or_else(|| StrategyError::MalformedParams("field count mismatch".to_string()))
    }

    fn encode(&self) -> Vec<u8> {
        let tokens: Vec<Token> = self.to_words().into_iter().map(Token::Uint).collect();
        ethabi::encode(&tokens)
    }
}

/// `(uint256 minLpAmount)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddSingleSidedParams {
    pub min_lp_amount: U256,
}

impl StrategyParams for AddSingleSidedParams {
    const FIELDS: &'static [&'static str] = &["minLpAmount"];

    fn from_words(words: &[U256]) -> Option<Self> {
        match words {
            [min_lp_amount] => Some(Self {
                min_lp_amount: *min_lp_amount,
            }),
            _ => None,
        }
    }

    fn to_words(&self) -> Vec<U256> {
        vec![self.min_lp_amount]
    }
}

/// `(uint256 farmingTokenAmount, uint256 minLpAmount)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddTwoSidedParams {
    pub farming_token_amount: U256,
    pub min_lp_amount: U256,
}

impl StrategyParams for AddTwoSidedParams {
    const FIELDS: &'static [&'static str] = &["farmingTokenAmount", "minLpAmount"];

    fn from_words(words: &[U256]) -> Option<Self> {
        match words {
            [farming_token_amount, min_lp_amount] => Some(Self {
                farming_token_amount: *farming_token_amount,
                min_lp_amount: *min_lp_amount,
            }),
            _ => None,
        }
    }

    fn to_words(&self) -> Vec<U256> {
        vec![self.farming_token_amount, self.min_lp_amount]
    }
}

/// `(uint256 minFarmingToken)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawMinimizeTradingParams {
    pub min_farming_token: U256,
}

impl StrategyParams for WithdrawMinimizeTradingParams {
    const FIELDS: &'static [&'static str] = &["minFarmingToken"];

    fn from_words(words: &[U256]) -> Option<Self> {
        match words {
            [min_farming_token] => Some(Self {
                min_farming_token: *min_farming_token,
            }),
            _ => None,
        }
    }

    fn to_words(&self) -> Vec<U256> {
        vec![self.min_farming_token]
    }
}

/// `(uint256 maxLpTokenToLiquidate, uint256 maxDebtRepayment, uint256 minBaseToken)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialCloseLiquidateParams {
    pub max_lp_to_liquidate: U256,
    pub max_debt_repayment: U256,
    pub min_base_token: U256,
}

impl StrategyParams for PartialCloseLiquidateParams {
    const FIELDS: &'static [&'static str] =
        &["maxLpTokenToLiquidate", "maxDebtRepayment", "minBaseToken"];

    fn from_words(words: &[U256]) -> Option<Self> {
        match words {
            [max_lp_to_liquidate, max_debt_repayment, min_base_token] => Some(Self {
                max_lp_to_liquidate: *max_lp_to_liquidate,
                max_debt_repayment: *max_debt_repayment,
                min_base_token: *min_base_token,
            }),
            _ => None,
        }
    }

    fn to_words(&self) -> Vec<U256> {
        vec![
            self.max_lp_to_liquidate,
            self.max_debt_repayment,
            self.min_base_token,
        ]
    }
}

/// `(uint256 minBaseToken)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidateParams {
    pub min_base_token: U256,
}

impl StrategyParams for LiquidateParams {
    const FIELDS: &'static [&'static str] = &["minBaseToken"];

    fn from_words(words: &[U256]) -> Option<Self> {
        match words {
            [min_base_token] => Some(Self {
                min_base_token: *min_base_token,
            }),
            _ => None,
        }
    }

    fn to_words(&self) -> Vec<U256> {
        vec![self.min_base_token]
    }
}

/// `(uint256 maxLpTokenToLiquidate, uint256 maxDebtRepayment, uint256 minFarmingToken)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialCloseMinimizeTradingParams {
    pub max_lp_to_liquidate: U256,
    pub max_debt_repayment: U256,
    pub min_farming_token: U256,
}

impl StrategyParams for PartialCloseMinimizeTradingParams {
    const FIELDS: &'static [&'static str] =
        &["maxLpTokenToLiquidate", "maxDebtRepayment", "minFarmingToken"];

    fn from_words(words: &[U256]) -> Option<Self> {
        match words {
            [max_lp_to_liquidate, max_debt_repayment, min_farming_token] => Some(Self {
                max_lp_to_liquidate: *max_lp_to_liquidate,
                max_debt_repayment: *max_debt_repayment,
                min_farming_token: *min_farming_token,
            }),
            _ => None,
        }
    }

    fn to_words(&self) -> Vec<U256> {
        vec![
            self.max_lp_to_liquidate,
            self.max_debt_repayment,
            self.min_farming_token,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_blob() {
        // abi.encode(uint256(0x10), uint256(1e18))
        let blob = hex::decode(concat!(
            "0000000000000000000000000000000000000000000000000000000000000010",
            "0000000000000000000000000000000000000000000000000de0b6b3a7640000",
        ))
        .unwrap();

        let params = AddTwoSidedParams::decode(&blob).unwrap();
        assert_eq!(params.farming_token_amount, U256::from(16));
        assert_eq!(params.min_lp_amount, U256::exp10(18));
        assert_eq!(params.encode(), blob);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let blob = LiquidateParams {
            min_base_token: U256::one(),
        }
        .encode();

        // one word too few, one word too many, trailing garbage
        assert!(matches!(
            AddTwoSidedParams::decode(&blob),
            Err(StrategyError::MalformedParams(_))
        ));
        let mut long = blob.clone();
        long.extend_from_slice(&blob);
        assert!(LiquidateParams::decode(&long).is_err());
        long.truncate(WORD + 3);
        assert!(LiquidateParams::decode(&long).is_err());
        assert!(LiquidateParams::decode(&[]).is_err());
    }

    #[test]
    fn test_three_word_params() {
        let params = PartialCloseLiquidateParams {
            max_lp_to_liquidate: U256::MAX,
            max_debt_repayment: U256::exp10(18),
            min_base_token: U256::zero(),
        };
        let blob = params.encode();
        assert_eq!(blob.len(), 3 * WORD);
        assert_eq!(PartialCloseLiquidateParams::decode(&blob).unwrap(), params);
        assert!(PartialCloseMinimizeTradingParams::decode(&blob).is_ok());
        assert!(WithdrawMinimizeTradingParams::decode(&blob).is_err());
    }
}
