//! Ledger configuration management.
//!
//! Tunable policies (trial-balance tolerance, reconciliation matching
//! window, declining-balance rate) are configuration, not constants.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Ledger configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LedgerConfig {
    /// Balance calculation configuration.
    #[serde(default)]
    pub balance: BalanceConfig,
    /// Bank reconciliation configuration.
    #[serde(default)]
    pub reconciliation: ReconciliationConfig,
    /// Depreciation configuration.
    #[serde(default)]
    pub depreciation: DepreciationConfig,
}

/// Balance calculation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceConfig {
    /// Absolute debit/credit difference below which a trial balance is
    /// considered balanced.
    #[serde(default = "default_trial_balance_tolerance")]
    pub trial_balance_tolerance: Decimal,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            trial_balance_tolerance: default_trial_balance_tolerance(),
        }
    }
}

fn default_trial_balance_tolerance() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

/// Bank reconciliation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconciliationConfig {
    /// Maximum distance in days between a bank transaction date and a
    /// journal line date for the auto-matcher to propose a match.
    #[serde(default = "default_match_date_window_days")]
    pub match_date_window_days: i64,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            match_date_window_days: default_match_date_window_days(),
        }
    }
}

fn default_match_date_window_days() -> i64 {
    3
}

/// Depreciation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DepreciationConfig {
    /// Annual declining-balance rate applied when an asset category does
    /// not define its own.
    #[serde(default = "default_declining_rate")]
    pub default_declining_rate: Decimal,
}

impl Default for DepreciationConfig {
    fn default() -> Self {
        Self {
            default_declining_rate: default_declining_rate(),
        }
    }
}

fn default_declining_rate() -> Decimal {
    Decimal::new(40, 2) // 0.40 per year
}

impl LedgerConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MERIDIAN").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
