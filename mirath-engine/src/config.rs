//! Engine configuration, read from the `[engine]` table of `mirath.toml`.
//!
//! Every field has a default, so an empty or missing file yields
//! [`EngineConfig::default`].

use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::{EngineError, EngineResult};

/// How monetary amounts are rounded to currency precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Ties round away from zero (0.125 → 0.13).
    #[default]
    HalfUp,
    /// Ties round to the even digit (0.125 → 0.12).
    Bankers,
}

impl RoundingMode {
    #[must_use]
    pub fn strategy(self) -> RoundingStrategy {
        match self {
            Self::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Self::Bankers => RoundingStrategy::MidpointNearestEven,
        }
    }
}

/// Who takes part in Radd.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaddPolicy {
    /// Every fixed share is scaled by the same factor.
    #[default]
    Proportional,
    /// Spouses keep their fixed share; the other fixed heirs absorb the
    /// surplus. Falls back to `Proportional` when only spouses hold fixed
    /// shares.
    ExcludeSpouse,
}

/// Tunables for a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rounding: RoundingMode,
    /// Decimal places of the currency's minor unit.
    pub currency_precision: u32,
    pub radd: RaddPolicy,
    /// Upper bound on the count of any single heir category.
    pub max_heir_count: u32,
    /// Tolerance used when checking wire-level fraction sums.
    pub fraction_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rounding: RoundingMode::HalfUp,
            currency_precision: 2,
            radd: RaddPolicy::Proportional,
            max_heir_count: 10_000,
            fraction_tolerance: 1e-9,
        }
    }
}

/// Raw TOML structure of `mirath.toml`.
#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    engine: EngineConfig,
}

impl EngineConfig {
    /// Parses the `[engine]` table from TOML text and validates it.
    pub fn from_toml(input: &str) -> EngineResult<Self> {
        let file: ConfigFile =
            toml::from_str(input).map_err(|e| EngineError::Config(e.to_string()))?;
        file.engine.validate()?;
        Ok(file.engine)
    }

    /// Loads config from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> EngineResult<Self> {
        if !path.exists() {
            info!(path = %path.display(), "No engine config found, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml(&contents)?;
        info!(path = %path.display(), "Loaded engine config");
        Ok(config)
    }

    /// Rejects values the engine cannot honour.
    pub fn validate(&self) -> EngineResult<()> {
        if self.currency_precision > 10 {
            return Err(EngineError::Config(format!(
                "currency_precision must be at most 10, got {}",
                self.currency_precision
            )));
        }
        if self.max_heir_count == 0 {
            return Err(EngineError::Config(
                "max_heir_count must be at least 1".into(),
            ));
        }
        if !(self.fraction_tolerance > 0.0 && self.fraction_tolerance < 1e-3) {
            return Err(EngineError::Config(format!(
                "fraction_tolerance must be in (0, 0.001), got {}",
                self.fraction_tolerance
            )));
        }
        Ok(())
    }
}
