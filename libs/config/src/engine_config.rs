//! Engine Configuration Module
//!
//! Provides configuration loading for the strategy engine. Supports loading
//! from TOML files with environment variable overrides.

use crate::defaults;
use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Main engine configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Log output settings
    pub logging: LoggingConfig,

    /// Strategy tuning
    pub strategy: StrategyConfig,

    /// Per-DEX fee overrides keyed by pool type, e.g. `pancake_swap_v2`
    pub dexes: HashMap<String, DexProfile>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive such as `info` or `lyf_strategies=debug`
    pub level: String,
    pub json: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct StrategyConfig {
    pub dust_threshold_wei: u64,
}

/// Fee override for one DEX, as the retained fraction of the swap input
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct DexProfile {
    pub fee_numerator: u32,
    pub fee_denominator: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::logging::LEVEL.to_string(),
            json: defaults::logging::JSON,
        }
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            dust_threshold_wei: defaults::strategy::DUST_THRESHOLD_WEI,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file with `LYF__` environment overrides
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with(path, Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix(defaults::env::PREFIX)
            .separator(defaults::env::SEPARATOR)
            .try_parsing(true)
    }

    fn load_with(path: &Path, environment: Environment) -> Result<Self> {
        info!("Loading engine config: {:?}", path);

        let config = Config::builder()
            .add_source(File::from(path).required(true))
            .add_source(environment)
            .build()
            .context("Failed to build configuration")?;

        let engine: EngineConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        engine.validate()?;
        Ok(engine)
    }

    /// Parse an embedded TOML document without consulting the environment
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()
            .context("Failed to parse configuration")?;

        let engine: EngineConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        engine.validate()?;
        Ok(engine)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Get the fee override for a DEX, if one is configured
    pub fn dex(&self, key: &str) -> Option<&DexProfile> {
        self.dexes.get(key)
    }

    fn validate(&self) -> Result<()> {
        for (name, profile) in &self.dexes {
            if profile.fee_numerator == 0 || profile.fee_numerator > profile.fee_denominator {
                bail!(
                    "Invalid fee for dex '{}': {}/{}",
                    name,
                    profile.fee_numerator,
                    profile.fee_denominator
                );
            }
            debug!(
                dex = %name,
                numerator = profile.fee_numerator,
                denominator = profile.fee_denominator,
                "Fee override"
            );
        }
        Ok(())
    }
}
