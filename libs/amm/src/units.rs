//! Conversion of raw token amounts into human units for logs and reports

use ethereum_types::U256;
use rust_decimal::Decimal;

/// Standard ERC-20 precision
pub const DEFAULT_DECIMALS: u32 = 18;

/// `amount / 10^decimals` as a Decimal, `None` if the value does not fit in
/// Decimal's 96-bit mantissa
pub fn to_units(amount: U256, decimals: u32) -> Option<Decimal> {
    if amount > U256::from(i128::MAX as u128) {
        return None;
    }
    Decimal::try_from_i128_with_scale(amount.as_u128() as i128, decimals).ok()
}

/// Render an 18-decimal amount, falling back to raw wei when out of range
pub fn display_amount(amount: U256) -> String {
    match to_units(amount, DEFAULT_DECIMALS) {
        Some(units) => units.normalize().to_string(),
        None => format!("{amount} wei"),
    }
}
