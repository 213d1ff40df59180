//! # LYF Engine Configuration
//!
//! Configuration management and defaults for the leveraged-farming strategy
//! engine.
//!
//! ## Features
//!
//! - **Logging**: filter directive and JSON output switch
//! - **Strategy Tuning**: dust threshold below which rebalancing swaps are skipped
//! - **DEX Fee Overrides**: per pool type retained-fee fractions
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lyf_config::EngineConfig;
//! use std::path::Path;
//!
//! let config = EngineConfig::load(Path::new("config/engine.toml"))?;
//! let dust = config.strategy.dust_threshold_wei;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! Every key may be overridden from the environment with the `LYF__` prefix,
//! e.g. `LYF__LOGGING__JSON=true`.

pub mod defaults;
pub mod engine_config;

// Re-export commonly used types
pub use engine_config::{DexProfile, EngineConfig, LoggingConfig, StrategyConfig};
