//! Warehouse configuration.
//!
//! Sources, in order of use: explicit values, `STOCKROOM_*` environment
//! variables, JSON documents. Anything not given falls back to the defaults.

use serde::Deserialize;
use thiserror::Error;

use stockroom_core::{AmountPolicy, AmountRules, DEFAULT_AMOUNT_TOLERANCE};

pub const TOLERANCE_VAR: &str = "STOCKROOM_AMOUNT_TOLERANCE";
pub const POLICY_VAR: &str = "STOCKROOM_AMOUNT_POLICY";

/// Half the distance between two half-integers; a larger tolerance would make
/// every amount valid.
const MAX_TOLERANCE: f64 = 0.25;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("amount tolerance must be finite and in [0, 0.25), got {0}")]
    InvalidTolerance(f64),

    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WarehouseConfig {
    /// How far from a valid integer/half-integer an amount may be.
    pub amount_tolerance: f64,
    /// Whether accepted amounts are snapped or kept as supplied.
    pub amount_policy: AmountPolicy,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            amount_tolerance: DEFAULT_AMOUNT_TOLERANCE,
            amount_policy: AmountPolicy::Snap,
        }
    }
}

impl WarehouseConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup` (variable name → value).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(TOLERANCE_VAR) {
            config.amount_tolerance = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: TOLERANCE_VAR,
                value: raw.clone(),
            })?;
        }

        if let Some(raw) = lookup(POLICY_VAR) {
            config.amount_policy = match raw.trim().to_ascii_lowercase().as_str() {
                "snap" => AmountPolicy::Snap,
                "keep" => AmountPolicy::Keep,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: POLICY_VAR,
                        value: raw,
                    });
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let tolerance = self.amount_tolerance;
        if !tolerance.is_finite() || !(0.0..MAX_TOLERANCE).contains(&tolerance) {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        Ok(())
    }

    pub fn rules(&self) -> AmountRules {
        AmountRules::new(self.amount_tolerance, self.amount_policy)
    }
}
