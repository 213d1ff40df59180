//! Error types for liquidity strategies

use ethereum_types::{Address, U256};
use lyf_amm::AmmError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
    #[error("Caller {0:?} is not allowed to use this strategy")]
    UnauthorizedCaller(Address),

    #[error("{sender:?} is not the owner")]
    NotOwner { sender: Address },

    #[error("Malformed strategy params: {0}")]
    MalformedParams(String),

    #[error("Insufficient liquidity received: {received} < {minimum}")]
    InsufficientLiquidityReceived { received: U256, minimum: U256 },

    #[error("Insufficient farming token received: {received} < {minimum}")]
    InsufficientFarmingTokenReceived { received: U256, minimum: U256 },

    #[error(
        "Insufficient base token received: {received} after repaying {debt_repayment}, minimum {minimum}"
    )]
    InsufficientBaseTokenReceived {
        received: U256,
        debt_repayment: U256,
        minimum: U256,
    },

    #[error("Cannot cover base deficit {deficit} with {farming_available} farming tokens")]
    ArithmeticUnderflow {
        deficit: U256,
        farming_available: U256,
    },

    #[error("Insufficient balance of {token:?} for {holder:?}: {balance} < {requested}")]
    InsufficientBalance {
        token: Address,
        holder: Address,
        balance: U256,
        requested: U256,
    },

    #[error("Insufficient allowance of {token:?} from {owner:?}: {allowance} < {requested}")]
    InsufficientAllowance {
        token: Address,
        owner: Address,
        allowance: U256,
        requested: U256,
    },

    #[error("No pair for {token_a:?} / {token_b:?}")]
    UnknownPair { token_a: Address, token_b: Address },

    #[error("No pool at {0:?}")]
    UnknownPool(Address),

    #[error("Pair for {token_a:?} / {token_b:?} already exists")]
    PairExists { token_a: Address, token_b: Address },

    #[error("Unknown DEX '{0}' in fee overrides")]
    UnknownDex(String),

    #[error("Token {0:?} cannot be handed to this strategy")]
    UnexpectedToken(Address),

    #[error("Strategy left {amount} of {token:?} behind")]
    ResidualBalance { token: Address, amount: U256 },

    #[error(transparent)]
    Amm(#[from] AmmError),
}

/// Coarse failure taxonomy used by position managers to pick a fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorClass {
    Authorization,
    Decoding,
    Slippage,
    Arithmetic,
    Execution,
}

impl StrategyError {
    pub fn class(&self) -> ErrorClass {
        match self {
            StrategyError::UnauthorizedCaller(_) | StrategyError::NotOwner { .. } => {
                ErrorClass::Authorization
            }
            StrategyError::MalformedParams(_) => ErrorClass::Decoding,
            StrategyError::InsufficientLiquidityReceived { .. }
            | StrategyError::InsufficientFarmingTokenReceived { .. }
            | StrategyError::InsufficientBaseTokenReceived { .. } => ErrorClass::Slippage,
            StrategyError::ArithmeticUnderflow { .. } => ErrorClass::Arithmetic,
            StrategyError::Amm(amm) => match amm {
                AmmError::InsufficientAAmount { .. }
                | AmmError::InsufficientBAmount { .. }
                | AmmError::ExcessiveInputAmount { .. }
                | AmmError::InsufficientOutputAmount => ErrorClass::Slippage,
                AmmError::Overflow(_) | AmmError::Underflow(_) | AmmError::DivisionByZero(_) => {
                    ErrorClass::Arithmetic
                }
                _ => ErrorClass::Execution,
            },
            _ => ErrorClass::Execution,
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorClass::Authorization => "authorization",
            ErrorClass::Decoding => "decoding",
            ErrorClass::Slippage => "slippage",
            ErrorClass::Arithmetic => "arithmetic",
            ErrorClass::Execution => "execution",
        };
        f.write_str(name)
    }
}

pub type Result<T> = std::result::Result<T, StrategyError>;
