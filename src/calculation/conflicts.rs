//! Organization-wide over-allocation detection.

use std::collections::BTreeMap;

use tracing::info;
use uuid::Uuid;

use crate::config::AllocationConfig;
use crate::error::EngineResult;
use crate::models::{ConflictRecord, EmployeeAllocation, Period, PeriodAllocation, UtilizationResult};
use crate::source::AllocationSource;

use super::full_time_hours::FullTimeHoursCache;
use super::monthly_summary::summarize_allocations;

/// Summarizes every employee appearing in a period's allocation rows.
///
/// Results are ordered by employee id. Employees without allocations in the
/// period are not included.
pub(crate) fn summarize_all_employees<S: AllocationSource + ?Sized>(
    source: &S,
    config: &AllocationConfig,
    full_time_hours: &mut FullTimeHoursCache<'_>,
    period: Period,
    rows: &[PeriodAllocation],
) -> EngineResult<Vec<UtilizationResult>> {
    let mut by_employee: BTreeMap<&str, Vec<EmployeeAllocation>> = BTreeMap::new();
    for row in rows {
        by_employee
            .entry(row.employee_id.as_str())
            .or_default()
            .push(EmployeeAllocation {
                project_id: row.project_id.clone(),
                assignment_id: row.assignment_id.clone(),
                hours: row.hours,
            });
    }

    by_employee
        .iter()
        .map(|(employee_id, rows)| {
            summarize_allocations(source, config, full_time_hours, employee_id, period, rows)
        })
        .collect()
}

/// Sorts conflicts by descending FTE, then ascending employee id.
pub(crate) fn sort_conflicts(conflicts: &mut [ConflictRecord]) {
    conflicts.sort_by(|a, b| {
        b.fte
            .cmp(&a.fte)
            .then_with(|| a.employee_id.cmp(&b.employee_id))
    });
}

/// Finds every over-allocated employee in the organization for a month.
///
/// Every employee with at least one allocation in the period is summarized
/// with the same rules as
/// [`compute_monthly_summary`](super::compute_monthly_summary); those whose
/// FTE exceeds 1.0 are returned, highest FTE first with ties broken by
/// employee id ascending.
///
/// # Errors
///
/// - [`EngineError::InvalidPeriod`](crate::error::EngineError::InvalidPeriod) for an invalid year or month
/// - [`EngineError::InvalidInput`](crate::error::EngineError::InvalidInput) if any allocation or override is negative
/// - Any error reported by the data source
///
/// # Example
///
/// ```
/// use allocation_engine::calculation::detect_organization_conflicts;
/// use allocation_engine::config::AllocationConfig;
/// use allocation_engine::source::InMemorySource;
///
/// let conflicts =
///     detect_organization_conflicts(&InMemorySource::new(), &AllocationConfig::default(), 2024, 11)
///         .unwrap();
/// assert!(conflicts.is_empty());
/// ```
pub fn detect_organization_conflicts<S: AllocationSource + ?Sized>(
    source: &S,
    config: &AllocationConfig,
    year: i32,
    month: u32,
) -> EngineResult<Vec<ConflictRecord>> {
    let period = Period::new(year, month)?;
    let scan_id = Uuid::new_v4();

    let rows = source.allocations_in_period(period)?;
    let mut full_time_hours = FullTimeHoursCache::new(config, period);
    let summaries = summarize_all_employees(source, config, &mut full_time_hours, period, &rows)?;
    let employees_scanned = summaries.len();

    let mut conflicts: Vec<ConflictRecord> = summaries
        .into_iter()
        .filter(|s| s.is_conflict)
        .map(ConflictRecord::from)
        .collect();
    sort_conflicts(&mut conflicts);

    info!(
        scan_id = %scan_id,
        %period,
        employees_scanned,
        conflicts = conflicts.len(),
        "Completed organization conflict scan"
    );

    Ok(conflicts)
}
