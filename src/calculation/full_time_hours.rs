//! Effective full-time hours resolution.
//!
//! A project may override the organization's standard monthly hours for a
//! given month (e.g., 140 hours in a holiday month). An override fully
//! replaces the standard for that (project, month) pair.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::AllocationConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::Period;
use crate::source::AllocationSource;

/// Where the effective full-time hours came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullTimeHoursSource {
    /// A project and month override.
    Override,
    /// The organization-wide standard.
    Standard,
}

/// Resolves the full-time hours in effect for a project in a month.
///
/// Resolution order is the project's override for the month, then the
/// configured standard monthly hours.
///
/// # Errors
///
/// - [`EngineError::InvalidInput`] if the override is zero or negative
/// - Any error reported by the data source
///
/// # Example
///
/// ```
/// use allocation_engine::calculation::{resolve_full_time_hours, FullTimeHoursSource};
/// use allocation_engine::config::AllocationConfig;
/// use allocation_engine::models::Period;
/// use allocation_engine::source::InMemorySource;
/// use rust_decimal::Decimal;
///
/// let december = Period::new(2024, 12).unwrap();
/// let source = InMemorySource::new().with_override("prj_a", december, Decimal::from(140));
/// let config = AllocationConfig::default();
///
/// let (hours, from) = resolve_full_time_hours(&source, &config, "prj_a", december).unwrap();
/// assert_eq!(hours, Decimal::from(140));
/// assert_eq!(from, FullTimeHoursSource::Override);
///
/// let (hours, from) = resolve_full_time_hours(&source, &config, "prj_b", december).unwrap();
/// assert_eq!(hours, Decimal::from(160));
/// assert_eq!(from, FullTimeHoursSource::Standard);
/// ```
pub fn resolve_full_time_hours<S: AllocationSource + ?Sized>(
    source: &S,
    config: &AllocationConfig,
    project_id: &str,
    period: Period,
) -> EngineResult<(Decimal, FullTimeHoursSource)> {
    match source.monthly_override(project_id, period)? {
        Some(hours) => {
            if hours <= Decimal::ZERO {
                return Err(EngineError::invalid_input(
                    "overridden_hours",
                    format!(
                        "override for project '{}' in {} must be greater than zero, got {}",
                        project_id, period, hours
                    ),
                ));
            }
            debug!(project_id, %period, %hours, "Using monthly hour override");
            Ok((hours, FullTimeHoursSource::Override))
        }
        None => Ok((config.standard_monthly_hours(), FullTimeHoursSource::Standard)),
    }
}

/// Memoizes full-time hours per project for a single period.
///
/// Organization-wide scans touch the same projects for many employees; the
/// cache keeps it to one override lookup per project.
#[derive(Debug)]
pub(crate) struct FullTimeHoursCache<'a> {
    config: &'a AllocationConfig,
    period: Period,
    resolved: HashMap<String, Decimal>,
}

impl<'a> FullTimeHoursCache<'a> {
    pub(crate) fn new(config: &'a AllocationConfig, period: Period) -> Self {
        Self {
            config,
            period,
            resolved: HashMap::new(),
        }
    }

    pub(crate) fn get<S: AllocationSource + ?Sized>(
        &mut self,
        source: &S,
        project_id: &str,
    ) -> EngineResult<Decimal> {
        if let Some(hours) = self.resolved.get(project_id) {
            return Ok(*hours);
        }
        let (hours, _) = resolve_full_time_hours(source, self.config, project_id, self.period)?;
        self.resolved.insert(project_id.to_string(), hours);
        Ok(hours)
    }
}
