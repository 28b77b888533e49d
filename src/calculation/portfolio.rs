//! Portfolio roll-up for a month.
//!
//! Combines every employee's monthly summary into the figures a director
//! dashboard needs: over-allocated employees, employees on the bench, FTE by
//! role and overall utilization.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::config::AllocationConfig;
use crate::error::EngineResult;
use crate::models::{
    BenchRecord, ConflictRecord, Period, PeriodAllocation, PortfolioSnapshot, RoleUtilization,
};
use crate::source::AllocationSource;

use super::conflicts::{sort_conflicts, summarize_all_employees};
use super::full_time_hours::FullTimeHoursCache;
use super::hours::{add_hours, divide, percentage, round_to, sum_hours};

/// Role reported for allocations whose assignment can no longer be found.
pub const UNASSIGNED_ROLE: &str = "Unassigned";

/// Builds the organization-wide portfolio snapshot for a month.
///
/// Only employees with at least one allocation in the period are counted.
/// Overall utilization is the mean employee FTE expressed as a percentage.
/// An employee is on the bench when their FTE is strictly below the
/// configured bench threshold.
///
/// # Errors
///
/// - [`EngineError::InvalidPeriod`](crate::error::EngineError::InvalidPeriod) for an invalid year or month
/// - [`EngineError::InvalidInput`](crate::error::EngineError::InvalidInput) if any allocation or override is negative, or if the hours are too large to aggregate
/// - Any error reported by the data source
pub fn portfolio_snapshot<S: AllocationSource + ?Sized>(
    source: &S,
    config: &AllocationConfig,
    year: i32,
    month: u32,
) -> EngineResult<PortfolioSnapshot> {
    let period = Period::new(year, month)?;
    let scan_id = Uuid::new_v4();

    let rows = source.allocations_in_period(period)?;
    let mut full_time_hours = FullTimeHoursCache::new(config, period);
    let summaries = summarize_all_employees(source, config, &mut full_time_hours, period, &rows)?;
    let employee_count = summaries.len();

    let total_hours = sum_hours("allocated_hours", summaries.iter().map(|s| s.total_hours))?;
    let fte_total = sum_hours("overridden_hours", summaries.iter().map(|s| s.fte))?;
    let overall_utilization_percentage = percentage(
        "overridden_hours",
        fte_total,
        Decimal::from(employee_count),
        config.percentage_precision(),
    )?;

    let mut bench: Vec<BenchRecord> = summaries
        .iter()
        .filter(|s| s.fte < config.bench_threshold())
        .map(|s| BenchRecord {
            employee_id: s.employee_id.clone(),
            fte: s.fte,
            total_hours: s.total_hours,
        })
        .collect();
    bench.sort_by(|a, b| a.fte.cmp(&b.fte).then_with(|| a.employee_id.cmp(&b.employee_id)));

    let mut over_allocated: Vec<ConflictRecord> = summaries
        .into_iter()
        .filter(|s| s.is_conflict)
        .map(ConflictRecord::from)
        .collect();
    sort_conflicts(&mut over_allocated);

    let fte_by_role = fte_by_role(source, config, &mut full_time_hours, &rows)?;

    info!(
        scan_id = %scan_id,
        %period,
        employee_count,
        over_allocated = over_allocated.len(),
        bench = bench.len(),
        %overall_utilization_percentage,
        "Built portfolio snapshot"
    );

    Ok(PortfolioSnapshot {
        period,
        employee_count,
        total_hours,
        overall_utilization_percentage,
        over_allocated,
        bench,
        fte_by_role,
    })
}

/// Groups each allocation's FTE contribution by its assignment's role.
///
/// Each assignment is looked up once, however many rows reference it.
fn fte_by_role<S: AllocationSource + ?Sized>(
    source: &S,
    config: &AllocationConfig,
    full_time_hours: &mut FullTimeHoursCache<'_>,
    rows: &[PeriodAllocation],
) -> EngineResult<Vec<RoleUtilization>> {
    let mut roles: HashMap<&str, Option<String>> = HashMap::new();
    let mut by_role: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();

    for row in rows {
        let role = match roles.get(row.assignment_id.as_str()) {
            Some(role) => role.clone(),
            None => {
                let role = source.assignment(&row.assignment_id)?.map(|a| a.role);
                roles.insert(row.assignment_id.as_str(), role.clone());
                role
            }
        }
        .unwrap_or_else(|| UNASSIGNED_ROLE.to_string());

        let project_full_time_hours = full_time_hours.get(source, &row.project_id)?;
        let contribution = divide("overridden_hours", row.hours, project_full_time_hours)?;
        let (hours, fte) = by_role.entry(role).or_insert((Decimal::ZERO, Decimal::ZERO));
        *hours = add_hours("allocated_hours", *hours, row.hours)?;
        *fte = add_hours("overridden_hours", *fte, contribution)?;
    }

    Ok(by_role
        .into_iter()
        .map(|(role, (hours, fte))| RoleUtilization {
            role,
            hours,
            fte: round_to(fte, config.fte_precision()),
        })
        .collect())
}
