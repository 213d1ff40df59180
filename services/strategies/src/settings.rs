//! Runtime strategy settings derived from the engine configuration

use crate::error::{Result, StrategyError};
use ethereum_types::U256;
use lyf_amm::{FeeSchedule, PoolType};
use lyf_config::EngineConfig;
use std::collections::HashMap;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategySettings {
    /// Two-sided adds skip rebalancing swaps at or below this amount
    pub dust_threshold: U256,
    fee_overrides: HashMap<PoolType, FeeSchedule>,
}

impl Default for StrategySettings {
    fn default() -> Self {
        Self {
            dust_threshold: U256::from(EngineConfig::default().strategy.dust_threshold_wei),
            fee_overrides: HashMap::new(),
        }
    }
}

impl StrategySettings {
    /// Settings plus validated per-DEX fee overrides
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let mut fee_overrides = HashMap::new();
        for (key, profile) in &config.dexes {
            let pool_type =
                PoolType::from_key(key).ok_or_else(|| StrategyError::UnknownDex(key.clone()))?;
            let fee = FeeSchedule::new(profile.fee_numerator, profile.fee_denominator)?;
            info!(%pool_type, %fee, "Fee override configured");
            fee_overrides.insert(pool_type, fee);
        }
        Ok(Self {
            dust_threshold: U256::from(config.strategy.dust_threshold_wei),
            fee_overrides,
        })
    }

    pub fn with_dust_threshold(mut self, dust_threshold: U256) -> Self {
        self.dust_threshold = dust_threshold;
        self
    }

    /// Fee schedule for new pairs of a DEX
    pub fn fee_for(&self, pool_type: PoolType) -> FeeSchedule {
        self.fee_overrides
            .get(&pool_type)
            .copied()
            .unwrap_or_else(|| pool_type.default_fee())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_overrides_from_config() {
        let config = EngineConfig::from_toml_str(
            r#"
[strategy]
dust_threshold_wei = 42

[dexes.mdex]
fee_numerator = 998
fee_denominator = 1000
"#,
        )
        .unwrap();

        let settings = StrategySettings::from_config(&config).unwrap();
        assert_eq!(settings.dust_threshold, U256::from(42));
        assert_eq!(settings.fee_for(PoolType::Mdex), FeeSchedule::BPS_20);
        assert_eq!(settings.fee_for(PoolType::PancakeSwapV2), FeeSchedule::BPS_25);
    }

    #[test]
    fn test_defaults() {
        let settings = StrategySettings::default();
        assert_eq!(settings.dust_threshold, U256::from(1000));
        assert_eq!(settings.fee_for(PoolType::UniswapV2), FeeSchedule::BPS_30);
    }

    #[test]
    fn test_unknown_dex_rejected() {
        let config = EngineConfig::from_toml_str(
            "[dexes.pancakeswap]\nfee_numerator = 9975\nfee_denominator = 10000\n",
        )
        .unwrap();

        assert_eq!(
            StrategySettings::from_config(&config),
            Err(StrategyError::UnknownDex("pancakeswap".into()))
        );
    }

    #[test]
    fn test_shipped_config() {
        let config = EngineConfig::from_toml_str(include_str!("../../../config/engine.toml")).unwrap();
        let settings = StrategySettings::from_config(&config).unwrap();
        assert_eq!(settings.fee_for(PoolType::Mdex), FeeSchedule::BPS_20);
        assert_eq!(settings.dust_threshold, U256::from(1000));
    }
}
