//! Per-employee monthly utilization.
//!
//! This module aggregates an employee's allocations across every project for
//! one month and expresses the result as an FTE fraction.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::AllocationConfig;
use crate::error::EngineResult;
use crate::models::{EmployeeAllocation, Period, ProjectUtilization, UtilizationResult};
use crate::source::AllocationSource;

use super::full_time_hours::FullTimeHoursCache;
use super::hours::{add_hours, divide, ensure_non_negative, percentage, round_to, sum_hours};

/// FTE at which an employee is exactly fully allocated.
pub const FULL_TIME_FTE: Decimal = Decimal::ONE;

/// Computes an employee's utilization for a month.
///
/// Hours are summed per project and in total. Each project's hours are
/// divided by that project's effective full-time hours for the month
/// (override, else the configured standard) and the contributions are
/// summed into the employee's FTE, rounded to the configured precision.
/// The result is a conflict when the FTE is strictly greater than 1.0.
///
/// The conflict flag is decided on the rounded FTE so that it always agrees
/// with the reported figure: an excess smaller than half the last reported
/// digit (160.005h against 160h at 4 places) reads as exactly 1.0 and is not
/// a conflict.
///
/// # Errors
///
/// - [`EngineError::InvalidPeriod`](crate::error::EngineError::InvalidPeriod) if the month is outside 1..=12 or the year is out of domain
/// - [`EngineError::InvalidInput`](crate::error::EngineError::InvalidInput) if any allocation or override is negative, or if the hours are too large to aggregate
/// - Any error reported by the data source
///
/// # Examples
///
/// ## Over-allocated across two projects
///
/// ```
/// use allocation_engine::calculation::compute_monthly_summary;
/// use allocation_engine::config::AllocationConfig;
/// use allocation_engine::models::{Assignment, Period};
/// use allocation_engine::source::InMemorySource;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let assignment = |id: &str, project: &str| Assignment {
///     id: id.to_string(),
///     employee_id: "emp_001".to_string(),
///     project_id: project.to_string(),
///     role: "Developer".to_string(),
///     labor_category: "Engineer II".to_string(),
///     funded_hours: Decimal::from(2000),
/// };
/// let november = Period::new(2024, 11).unwrap();
/// let source = InMemorySource::new()
///     .with_assignment(assignment("asg_a", "prj_a"))
///     .with_assignment(assignment("asg_b", "prj_b"))
///     .with_allocation("asg_a", november, Decimal::from(160))
///     .with_allocation("asg_b", november, Decimal::from(60));
///
/// let result =
///     compute_monthly_summary(&source, &AllocationConfig::default(), "emp_001", 2024, 11).unwrap();
/// assert_eq!(result.total_hours, Decimal::from(220));
/// assert_eq!(result.fte, Decimal::from_str("1.375").unwrap());
/// assert!(result.is_conflict);
/// ```
pub fn compute_monthly_summary<S: AllocationSource + ?Sized>(
    source: &S,
    config: &AllocationConfig,
    employee_id: &str,
    year: i32,
    month: u32,
) -> EngineResult<UtilizationResult> {
    let period = Period::new(year, month)?;
    let rows = source.allocations_for_employee_in_period(employee_id, period)?;
    let mut full_time_hours = FullTimeHoursCache::new(config, period);
    summarize_allocations(
        source,
        config,
        &mut full_time_hours,
        employee_id,
        period,
        &rows,
    )
}

/// Builds a [`UtilizationResult`] from already-fetched allocation rows.
pub(crate) fn summarize_allocations<S: AllocationSource + ?Sized>(
    source: &S,
    config: &AllocationConfig,
    full_time_hours: &mut FullTimeHoursCache<'_>,
    employee_id: &str,
    period: Period,
    rows: &[EmployeeAllocation],
) -> EngineResult<UtilizationResult> {
    let mut hours_by_project: BTreeMap<&str, Decimal> = BTreeMap::new();
    for row in rows {
        ensure_non_negative(
            "allocated_hours",
            &format!("assignment '{}' in {}", row.assignment_id, period),
            row.hours,
        )?;
        let project_hours = hours_by_project
            .entry(row.project_id.as_str())
            .or_insert(Decimal::ZERO);
        *project_hours = add_hours("allocated_hours", *project_hours, row.hours)?;
    }

    let total_hours = sum_hours("allocated_hours", hours_by_project.values().copied())?;

    let mut fte_sum = Decimal::ZERO;
    let mut projects = Vec::with_capacity(hours_by_project.len());
    for (project_id, hours) in hours_by_project {
        let project_full_time_hours = full_time_hours.get(source, project_id)?;
        let contribution = divide("overridden_hours", hours, project_full_time_hours)?;
        fte_sum = add_hours("overridden_hours", fte_sum, contribution)?;

        projects.push(ProjectUtilization {
            project_id: project_id.to_string(),
            hours,
            percentage_of_total: percentage(
                "allocated_hours",
                hours,
                total_hours,
                config.percentage_precision(),
            )?,
            full_time_hours: project_full_time_hours,
            fte: round_to(contribution, config.fte_precision()),
        });
    }

    let fte = round_to(fte_sum, config.fte_precision());
    let is_conflict = fte > FULL_TIME_FTE;

    if is_conflict {
        warn!(
            employee_id,
            %period,
            %total_hours,
            %fte,
            projects = projects.len(),
            "Employee is over-allocated"
        );
    } else {
        debug!(employee_id, %period, %total_hours, %fte, "Computed monthly utilization");
    }

    Ok(UtilizationResult {
        employee_id: employee_id.to_string(),
        period,
        total_hours,
        fte,
        projects,
        is_conflict,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::Assignment;
    use crate::source::InMemorySource;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn period(year: i32, month: u32) -> Period {
        Period::new(year, month).unwrap()
    }

    fn assignment(id: &str, employee_id: &str, project_id: &str) -> Assignment {
        Assignment {
            id: id.to_string(),
            employee_id: employee_id.to_string(),
            project_id: project_id.to_string(),
            role: "Developer".to_string(),
            labor_category: "Engineer II".to_string(),
            funded_hours: dec("2000"),
        }
    }

    fn two_project_source() -> InMemorySource {
        InMemorySource::new()
            .with_assignment(assignment("asg_a", "emp_001", "prj_a"))
            .with_assignment(assignment("asg_b", "emp_001", "prj_b"))
    }

    // ==========================================================================
    // 160h on A + 60h on B against the 160h standard
    // ==========================================================================
    #[test]
    fn test_two_projects_over_allocated() {
        let source = two_project_source()
            .with_allocation("asg_a", period(2024, 11), dec("160"))
            .with_allocation("asg_b", period(2024, 11), dec("60"));

        let result =
            compute_monthly_summary(&source, &AllocationConfig::default(), "emp_001", 2024, 11)
                .unwrap();

        assert_eq!(result.total_hours, dec("220"));
        assert_eq!(result.fte, dec("1.375"));
        assert!(result.is_conflict);

        assert_eq!(result.projects.len(), 2);
        assert_eq!(result.projects[0].project_id, "prj_a");
        assert_eq!(result.projects[0].hours, dec("160"));
        assert_eq!(result.projects[0].percentage_of_total, dec("72.73"));
        assert_eq!(result.projects[0].fte, dec("1"));
        assert_eq!(result.projects[1].project_id, "prj_b");
        assert_eq!(result.projects[1].percentage_of_total, dec("27.27"));
        assert_eq!(result.projects[1].fte, dec("0.375"));
    }

    // ==========================================================================
    // Override of 140h, 140h allocated on that project only
    // ==========================================================================
    #[test]
    fn test_override_makes_exactly_full_time() {
        let source = two_project_source()
            .with_override("prj_a", period(2024, 12), dec("140"))
            .with_allocation("asg_a", period(2024, 12), dec("140"));

        let result =
            compute_monthly_summary(&source, &AllocationConfig::default(), "emp_001", 2024, 12)
                .unwrap();

        assert_eq!(result.fte, dec("1.0"));
        assert!(!result.is_conflict);
        assert_eq!(result.projects[0].full_time_hours, dec("140"));
    }

    #[test]
    fn test_exactly_full_time_is_not_conflict() {
        let source = two_project_source()
            .with_allocation("asg_a", period(2024, 11), dec("100"))
            .with_allocation("asg_b", period(2024, 11), dec("60"));

        let result =
            compute_monthly_summary(&source, &AllocationConfig::default(), "emp_001", 2024, 11)
                .unwrap();

        assert_eq!(result.fte, dec("1"));
        assert!(!result.is_conflict);
    }

    #[test]
    fn test_mixed_override_and_standard_sum_contributions() {
        // 70/140 + 80/160 = 0.5 + 0.5
        let source = two_project_source()
            .with_override("prj_a", period(2024, 12), dec("140"))
            .with_allocation("asg_a", period(2024, 12), dec("70"))
            .with_allocation("asg_b", period(2024, 12), dec("80"));

        let result =
            compute_monthly_summary(&source, &AllocationConfig::default(), "emp_001", 2024, 12)
                .unwrap();

        assert_eq!(result.total_hours, dec("150"));
        assert_eq!(result.fte, dec("1"));
        assert!(!result.is_conflict);
    }

    #[test]
    fn test_multiple_assignments_on_same_project_are_combined() {
        let source = InMemorySource::new()
            .with_assignment(assignment("asg_dev", "emp_001", "prj_a"))
            .with_assignment(assignment("asg_lead", "emp_001", "prj_a"))
            .with_allocation("asg_dev", period(2024, 11), dec("100"))
            .with_allocation("asg_lead", period(2024, 11), dec("40"));

        let result =
            compute_monthly_summary(&source, &AllocationConfig::default(), "emp_001", 2024, 11)
                .unwrap();

        assert_eq!(result.projects.len(), 1);
        assert_eq!(result.projects[0].hours, dec("140"));
        assert_eq!(result.projects[0].percentage_of_total, dec("100"));
        assert_eq!(result.fte, dec("0.875"));
    }

    #[test]
    fn test_no_allocations_returns_zero() {
        let source = two_project_source();

        let result =
            compute_monthly_summary(&source, &AllocationConfig::default(), "emp_001", 2024, 11)
                .unwrap();

        assert_eq!(result.total_hours, Decimal::ZERO);
        assert_eq!(result.fte, Decimal::ZERO);
        assert!(result.projects.is_empty());
        assert!(!result.is_conflict);
    }

    #[test]
    fn test_zero_hour_rows_have_zero_percentage() {
        let source = two_project_source().with_allocation("asg_a", period(2024, 11), dec("0"));

        let result =
            compute_monthly_summary(&source, &AllocationConfig::default(), "emp_001", 2024, 11)
                .unwrap();

        assert_eq!(result.projects.len(), 1);
        assert_eq!(result.projects[0].percentage_of_total, Decimal::ZERO);
        assert_eq!(result.fte, Decimal::ZERO);
    }

    #[test]
    fn test_fte_rounded_to_configured_precision() {
        // 100 / 160 + 1 / 3 -> rounded 4dp
        let source = two_project_source()
            .with_override("prj_b", period(2024, 11), dec("3"))
            .with_allocation("asg_a", period(2024, 11), dec("100"))
            .with_allocation("asg_b", period(2024, 11), dec("1"));

        let result =
            compute_monthly_summary(&source, &AllocationConfig::default(), "emp_001", 2024, 11)
                .unwrap();

        assert_eq!(result.fte, dec("0.9583"));
        assert_eq!(result.projects[1].fte, dec("0.3333"));
    }

    #[test]
    fn test_invalid_month_rejected() {
        let source = two_project_source();
        for month in [0, 13] {
            let result =
                compute_monthly_summary(&source, &AllocationConfig::default(), "emp_001", 2024, month);
            assert!(matches!(result, Err(EngineError::InvalidPeriod { .. })));
        }
    }

    #[test]
    fn test_negative_hours_rejected() {
        let source = two_project_source()
            .with_allocation("asg_a", period(2024, 11), dec("160"))
            .with_allocation("asg_b", period(2024, 11), dec("-20"));

        let result =
            compute_monthly_summary(&source, &AllocationConfig::default(), "emp_001", 2024, 11);

        match result {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "allocated_hours");
                assert!(message.contains("asg_b"));
            }
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    // ==========================================================================
    // 160.005h against 160h rounds to exactly 1.0000
    // ==========================================================================
    #[test]
    fn test_excess_below_reported_precision_is_not_conflict() {
        let source = two_project_source().with_allocation("asg_a", period(2024, 11), dec("160.005"));

        let result =
            compute_monthly_summary(&source, &AllocationConfig::default(), "emp_001", 2024, 11)
                .unwrap();

        assert_eq!(result.fte, dec("1"));
        assert!(!result.is_conflict);
    }

    #[test]
    fn test_tiny_override_out_of_range() {
        let source = two_project_source()
            .with_override("prj_a", period(2024, 11), dec("0.0000000000000000000001"))
            .with_allocation("asg_a", period(2024, 11), dec("100000000"));

        let result =
            compute_monthly_summary(&source, &AllocationConfig::default(), "emp_001", 2024, 11);

        match result {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "overridden_hours");
                assert_eq!(message, "value out of range");
            }
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_total_hours_overflow_out_of_range() {
        let source = two_project_source()
            .with_allocation("asg_a", period(2024, 11), Decimal::MAX)
            .with_allocation("asg_b", period(2024, 11), Decimal::MAX);

        let result =
            compute_monthly_summary(&source, &AllocationConfig::default(), "emp_001", 2024, 11);

        assert!(matches!(
            result,
            Err(EngineError::InvalidInput { ref field, ref message })
                if field == "allocated_hours" && message == "value out of range"
        ));
    }

    #[test]
    fn test_other_employees_ignored() {
        let source = two_project_source()
            .with_assignment(assignment("asg_other", "emp_002", "prj_a"))
            .with_allocation("asg_other", period(2024, 11), dec("200"))
            .with_allocation("asg_a", period(2024, 11), dec("80"));

        let result =
            compute_monthly_summary(&source, &AllocationConfig::default(), "emp_001", 2024, 11)
                .unwrap();

        assert_eq!(result.total_hours, dec("80"));
        assert_eq!(result.fte, dec("0.5"));
    }

    #[test]
    fn test_summary_is_idempotent() {
        let source = two_project_source()
            .with_allocation("asg_a", period(2024, 11), dec("160"))
            .with_allocation("asg_b", period(2024, 11), dec("60"));
        let config = AllocationConfig::default();

        let first = compute_monthly_summary(&source, &config, "emp_001", 2024, 11).unwrap();
        let second = compute_monthly_summary(&source, &config, "emp_001", 2024, 11).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_full_time_fte_constant() {
        assert_eq!(FULL_TIME_FTE, dec("1"));
    }
}
