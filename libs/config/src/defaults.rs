//! Engine defaults
//!
//! Default configuration values used when a section or key is absent from
//! the configuration file.

/// Logging defaults
pub mod logging {
    /// Default `EnvFilter` directive
    pub const LEVEL: &str = "info";

    /// Human-readable output unless JSON is requested
    pub const JSON: bool = false;
}

/// Strategy defaults
pub mod strategy {
    /// Two-sided adds skip the rebalancing swap at or below this amount (wei)
    pub const DUST_THRESHOLD_WEI: u64 = 1_000;
}

/// Environment variable handling
pub mod env {
    /// Prefix for overrides, e.g. `LYF__STRATEGY__DUST_THRESHOLD_WEI`
    pub const PREFIX: &str = "LYF";

    /// Separator between prefix and nested keys
    pub const SEPARATOR: &str = "__";
}
