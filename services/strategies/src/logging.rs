//! Standardized emoji logging for liquidity strategies
//!
//! Provides consistent emoji usage across strategy components and the
//! subscriber setup used by binaries and tests.

use anyhow::{Context, Result};
use lyf_config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Standard emoji set for strategy logging
pub struct LogEmoji;

impl LogEmoji {
    // Status indicators
    pub const SUCCESS: &'static str = "✅"; // Strategy call completed
    pub const ERROR: &'static str = "❌"; // Strategy call reverted
    pub const WARNING: &'static str = "⚠️"; // Warning or caution

    // Module-specific
    pub const LOCK: &'static str = "🔒"; // Access control
    pub const MONEY: &'static str = "💰"; // Debt repayment / returned funds

    // Event types
    pub const SWAP: &'static str = "🔄"; // Rebalancing swap
    pub const MINT: &'static str = "➕"; // Liquidity add
    pub const BURN: &'static str = "➖"; // Liquidity remove
}

// Convenience macros for standardized logging
#[macro_export]
macro_rules! log_success {
    ($($arg:tt)*) => {
        tracing::info!("{} {}", $crate::logging::LogEmoji::SUCCESS, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        tracing::error!("{} {}", $crate::logging::LogEmoji::ERROR, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_access {
    ($($arg:tt)*) => {
        tracing::warn!("{} {}", $crate::logging::LogEmoji::LOCK, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_swap {
    ($($arg:tt)*) => {
        tracing::debug!("{} {}", $crate::logging::LogEmoji::SWAP, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_liquidity {
    (add, $($arg:tt)*) => {
        tracing::debug!("{} {}", $crate::logging::LogEmoji::MINT, format!($($arg)*))
    };
    (remove, $($arg:tt)*) => {
        tracing::debug!("{} {}", $crate::logging::LogEmoji::BURN, format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_repay {
    ($($arg:tt)*) => {
        tracing::info!("{} {}", $crate::logging::LogEmoji::MONEY, format!($($arg)*))
    };
}

/// Install the global subscriber. Fails if the filter is invalid or a
/// subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.level)
        .with_context(|| format!("Invalid log filter '{}'", config.level))?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_rejected() {
        let config = LoggingConfig {
            level: "lyf_strategies=notalevel".to_string(),
            json: false,
        };
        assert!(init_tracing(&config).is_err());
    }
}
