//! Employee timeline across months.

use tracing::debug;

use crate::config::AllocationConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{PeriodRange, UtilizationResult};
use crate::source::AllocationSource;

use super::full_time_hours::FullTimeHoursCache;
use super::monthly_summary::summarize_allocations;

/// Builds an employee's month-by-month utilization over a range.
///
/// Each month in the inclusive range that has at least one allocation for
/// the employee yields a [`UtilizationResult`]; months without allocations
/// are omitted. Results are in chronological order.
///
/// # Errors
///
/// - [`EngineError::NotFound`] if the employee is unknown
/// - [`EngineError::InvalidInput`] if any allocation or override is negative
/// - Any error reported by the data source
pub fn employee_timeline<S: AllocationSource + ?Sized>(
    source: &S,
    config: &AllocationConfig,
    employee_id: &str,
    range: PeriodRange,
) -> EngineResult<Vec<UtilizationResult>> {
    if !source.employee_exists(employee_id)? {
        return Err(EngineError::not_found("Employee", employee_id));
    }

    let mut timeline = Vec::new();
    for period in range.iter() {
        let rows = source.allocations_for_employee_in_period(employee_id, period)?;
        if rows.is_empty() {
            continue;
        }
        let mut full_time_hours = FullTimeHoursCache::new(config, period);
        timeline.push(summarize_allocations(
            source,
            config,
            &mut full_time_hours,
            employee_id,
            period,
            &rows,
        )?);
    }

    debug!(
        employee_id,
        start = %range.start(),
        end = %range.end(),
        months = timeline.len(),
        "Built employee timeline"
    );

    Ok(timeline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, Period};
    use crate::source::InMemorySource;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn period(year: i32, month: u32) -> Period {
        Period::new(year, month).unwrap()
    }

    fn range(start: Period, end: Period) -> PeriodRange {
        PeriodRange::new(start, end).unwrap()
    }

    fn source() -> InMemorySource {
        InMemorySource::new()
            .with_assignment(Assignment {
                id: "asg_1".to_string(),
                employee_id: "emp_001".to_string(),
                project_id: "prj_a".to_string(),
                role: "Developer".to_string(),
                labor_category: "Engineer II".to_string(),
                funded_hours: dec("2000"),
            })
            .with_employee("emp_idle")
            // Inserted out of order on purpose
            .with_allocation("asg_1", period(2025, 1), dec("80"))
            .with_allocation("asg_1", period(2024, 11), dec("160"))
            .with_allocation("asg_1", period(2025, 3), dec("40"))
            .with_override("prj_a", period(2025, 1), dec("160"))
    }

    #[test]
    fn test_timeline_is_chronological_and_skips_empty_months() {
        let timeline = employee_timeline(
            &source(),
            &AllocationConfig::default(),
            "emp_001",
            range(period(2024, 10), period(2025, 3)),
        )
        .unwrap();

        let periods: Vec<Period> = timeline.iter().map(|r| r.period).collect();
        assert_eq!(
            periods,
            vec![period(2024, 11), period(2025, 1), period(2025, 3)]
        );
        assert_eq!(timeline[0].fte, dec("1"));
        assert_eq!(timeline[1].fte, dec("0.5"));
        assert_eq!(timeline[2].fte, dec("0.25"));
    }

    #[test]
    fn test_timeline_respects_range_bounds() {
        let timeline = employee_timeline(
            &source(),
            &AllocationConfig::default(),
            "emp_001",
            range(period(2024, 12), period(2025, 1)),
        )
        .unwrap();

        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].period, period(2025, 1));
    }

    #[test]
    fn test_known_employee_without_allocations() {
        let timeline = employee_timeline(
            &source(),
            &AllocationConfig::default(),
            "emp_idle",
            range(period(2024, 1), period(2024, 12)),
        )
        .unwrap();
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_unknown_employee_not_found() {
        let result = employee_timeline(
            &source(),
            &AllocationConfig::default(),
            "emp_404",
            range(period(2024, 1), period(2024, 12)),
        );
        assert!(matches!(
            result,
            Err(EngineError::NotFound { ref entity, .. }) if entity == "Employee"
        ));
    }
}
