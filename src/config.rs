//! # Configuration
//!
//! Numeric tolerances and the runtime configuration used by the command-line tool.

use crate::utils::math::round_to;
use crate::{MathResult, PandaMathError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Tolerance for approximate comparisons and degenerate-length checks.
pub const EPSILON: f64 = 1e-9;

/// Pivot magnitude below which a matrix is treated as singular.
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// Seed used when none is supplied.
pub const DEFAULT_SEED: u64 = 42;

/// Decimal digits printed by the command-line tool.
pub const DEFAULT_PRECISION: u32 = 6;

/// Largest precision that still means something for an `f64`.
pub const MAX_PRECISION: u32 = 17;

/// Unit in which user-supplied angles are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    /// Converts `value`, expressed in this unit, to radians.
    ///
    /// # Examples
    ///
    /// ```
    /// use panda_math::AngleUnit;
    ///
    /// assert_eq!(AngleUnit::Degrees.to_radians(180.0), std::f64::consts::PI);
    /// assert_eq!(AngleUnit::Radians.to_radians(1.5), 1.5);
    /// ```
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            AngleUnit::Degrees => value.to_radians(),
            AngleUnit::Radians => value,
        }
    }
}

impl FromStr for AngleUnit {
    type Err = PandaMathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deg" | "degree" | "degrees" => Ok(AngleUnit::Degrees),
            "rad" | "radian" | "radians" => Ok(AngleUnit::Radians),
            other => Err(PandaMathError::Parse(format!("unknown angle unit '{}'", other))),
        }
    }
}

/// Runtime configuration.
///
/// Loaded from JSON by the command-line tool; every field has a default so a
/// partial document is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MathConfig {
    /// Tolerance for approximate comparisons
    pub epsilon: f64,
    /// Seed for reproducible random sampling
    pub seed: u64,
    /// Decimal digits kept when printing results
    pub precision: u32,
    /// Unit for angles given on the command line
    pub angle_unit: AngleUnit,
}

impl MathConfig {
    /// Creates a configuration with default tolerances and the given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use panda_math::MathConfig;
    ///
    /// let config = MathConfig::new(7);
    /// assert_eq!(config.seed, 7);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            epsilon: EPSILON,
            seed,
            precision: DEFAULT_PRECISION,
            angle_unit: AngleUnit::Degrees,
        }
    }

    /// Creates a configuration for testing with looser tolerances.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            epsilon: 1e-6,
            seed,
            precision: 4,
            angle_unit: AngleUnit::Degrees,
        }
    }

    /// Parses and validates a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> MathResult<Self> {
        let config: MathConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> MathResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded config from {}", path.as_ref().display());
        Self::from_json_str(&text)
    }

    /// Checks that the tolerances make sense.
    pub fn validate(&self) -> MathResult<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(PandaMathError::InvalidArgument(format!(
                "epsilon must be a positive finite number, got {}",
                self.epsilon
            )));
        }
        if self.precision > MAX_PRECISION {
            return Err(PandaMathError::InvalidArgument(format!(
                "precision must be at most {}, got {}",
                MAX_PRECISION, self.precision
            )));
        }
        Ok(())
    }

    /// Prepares a computed value for output: magnitudes below `epsilon` become
    /// zero and the rest are rounded to `precision` digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use panda_math::MathConfig;
    ///
    /// let config = MathConfig::default();
    /// assert_eq!(config.present(6.123233995736766e-17), 0.0);
    /// assert_eq!(config.present(0.1234567891), 0.123457);
    /// ```
    pub fn present(&self, value: f64) -> f64 {
        if value.abs() < self.epsilon {
            0.0
        } else {
            round_to(value, self.precision)
        }
    }
}

impl Default for MathConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
