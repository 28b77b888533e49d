//! Configuration types for allocation aggregation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Default full-time hours in a month when no project override applies.
pub const DEFAULT_STANDARD_MONTHLY_HOURS: Decimal = Decimal::from_parts(160, 0, 0, false, 0);

/// Default number of decimal places kept on FTE fractions.
pub const DEFAULT_FTE_PRECISION: u32 = 4;

/// Default number of decimal places kept on percentages.
pub const DEFAULT_PERCENTAGE_PRECISION: u32 = 2;

/// Default FTE below which an employee counts as on the bench (25%).
pub const DEFAULT_BENCH_THRESHOLD: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// Identifying information about the organization the config belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrganizationMetadata {
    /// Short code for the organization (e.g., "default").
    pub code: String,
    /// Human-readable organization name.
    pub name: String,
}

/// Organization configuration file structure (`organization.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationConfig {
    /// Organization metadata.
    pub organization: OrganizationMetadata,
    /// Standard full-time hours per month.
    pub standard_monthly_hours: Decimal,
}

/// Threshold and rounding configuration file structure (`thresholds.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdsConfig {
    /// Decimal places kept on FTE fractions.
    #[serde(default = "default_fte_precision")]
    pub fte_precision: u32,
    /// Decimal places kept on percentages.
    #[serde(default = "default_percentage_precision")]
    pub percentage_precision: u32,
    /// FTE strictly below which an employee is reported on the bench.
    #[serde(default = "default_bench_threshold")]
    pub bench_threshold: Decimal,
}

fn default_fte_precision() -> u32 {
    DEFAULT_FTE_PRECISION
}

fn default_percentage_precision() -> u32 {
    DEFAULT_PERCENTAGE_PRECISION
}

fn default_bench_threshold() -> Decimal {
    DEFAULT_BENCH_THRESHOLD
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            fte_precision: DEFAULT_FTE_PRECISION,
            percentage_precision: DEFAULT_PERCENTAGE_PRECISION,
            bench_threshold: DEFAULT_BENCH_THRESHOLD,
        }
    }
}

/// The complete allocation configuration.
///
/// Carries the organization-wide standard full-time hours used whenever a
/// project has no override for a month, plus rounding and bench settings.
///
/// # Example
///
/// ```
/// use allocation_engine::config::AllocationConfig;
/// use rust_decimal::Decimal;
///
/// let config = AllocationConfig::default();
/// assert_eq!(config.standard_monthly_hours(), Decimal::from(160));
/// assert_eq!(config.fte_precision(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct AllocationConfig {
    metadata: OrganizationMetadata,
    standard_monthly_hours: Decimal,
    thresholds: ThresholdsConfig,
}

impl AllocationConfig {
    /// Creates a validated configuration from its component parts.
    ///
    /// Fails with [`EngineError::InvalidConfig`] if the standard hours are not
    /// positive, the bench threshold is negative, or a precision exceeds 28.
    pub fn new(
        metadata: OrganizationMetadata,
        standard_monthly_hours: Decimal,
        thresholds: ThresholdsConfig,
    ) -> EngineResult<Self> {
        if standard_monthly_hours <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "standard_monthly_hours".to_string(),
                message: format!("must be greater than zero, got {}", standard_monthly_hours),
            });
        }
        if thresholds.bench_threshold < Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "bench_threshold".to_string(),
                message: format!("must not be negative, got {}", thresholds.bench_threshold),
            });
        }
        // rust_decimal supports at most 28 fractional digits
        for (field, value) in [
            ("fte_precision", thresholds.fte_precision),
            ("percentage_precision", thresholds.percentage_precision),
        ] {
            if value > 28 {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: format!("must be at most 28, got {}", value),
                });
            }
        }

        Ok(Self {
            metadata,
            standard_monthly_hours,
            thresholds,
        })
    }

    /// Returns a default configuration using the given standard monthly hours.
    pub fn with_standard_hours(standard_monthly_hours: Decimal) -> EngineResult<Self> {
        let default = Self::default();
        Self::new(default.metadata, standard_monthly_hours, default.thresholds)
    }

    /// Returns the organization metadata.
    pub fn organization(&self) -> &OrganizationMetadata {
        &self.metadata
    }

    /// Returns the standard full-time hours per month.
    pub fn standard_monthly_hours(&self) -> Decimal {
        self.standard_monthly_hours
    }

    /// Returns the number of decimal places kept on FTE fractions.
    pub fn fte_precision(&self) -> u32 {
        self.thresholds.fte_precision
    }

    /// Returns the number of decimal places kept on percentages.
    pub fn percentage_precision(&self) -> u32 {
        self.thresholds.percentage_precision
    }

    /// Returns the bench threshold as an FTE fraction.
    pub fn bench_threshold(&self) -> Decimal {
        self.thresholds.bench_threshold
    }
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            metadata: OrganizationMetadata {
                code: "default".to_string(),
                name: "Default Organization".to_string(),
            },
            standard_monthly_hours: DEFAULT_STANDARD_MONTHLY_HOURS,
            thresholds: ThresholdsConfig::default(),
        }
    }
}
