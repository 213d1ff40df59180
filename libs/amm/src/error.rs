//! Error types for pool and solver arithmetic

use ethereum_types::{Address, U256};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    #[error("Insufficient input amount")]
    InsufficientInputAmount,

    #[error("Insufficient output amount")]
    InsufficientOutputAmount,

    #[error("Insufficient liquidity")]
    InsufficientLiquidity,

    #[error("Insufficient amount")]
    InsufficientAmount,

    #[error("Insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    #[error("Insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    #[error("Insufficient A amount: {amount} below minimum {minimum}")]
    InsufficientAAmount { amount: U256, minimum: U256 },

    #[error("Insufficient B amount: {amount} below minimum {minimum}")]
    InsufficientBAmount { amount: U256, minimum: U256 },

    #[error("Excessive input amount: {required} exceeds maximum {maximum}")]
    ExcessiveInputAmount { required: U256, maximum: U256 },

    #[error("Constant product invariant violated by swap")]
    KInvariantViolated,

    #[error("Arithmetic overflow in {0}")]
    Overflow(&'static str),

    #[error("Arithmetic underflow in {0}")]
    Underflow(&'static str),

    #[error("Division by zero in {0}")]
    DivisionByZero(&'static str),

    #[error("Invalid fee schedule {numerator}/{denominator}")]
    InvalidFeeSchedule { numerator: u32, denominator: u32 },

    #[error("Pool tokens must differ: {0:?}")]
    IdenticalTokens(Address),

    #[error("Token {token:?} is not part of pool {pool:?}")]
    TokenNotInPool { token: Address, pool: Address },

    #[error("Swap path needs at least two tokens")]
    InvalidPath,

    #[error("Solver root {root} outside [0, {amount_in}]")]
    SolverOutOfRange { root: U256, amount_in: U256 },
}

pub type Result<T> = std::result::Result<T, AmmError>;
