//! Funded-hours budget checks.
//!
//! An assignment is funded for a fixed number of hours over its lifetime.
//! These functions compare the cumulative allocated hours against that
//! ceiling, per assignment and per project.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::AllocationConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Assignment, OverrunResult, ProjectBudgetSummary};
use crate::source::AllocationSource;

use super::hours::{add_hours, ensure_non_negative, percentage};

/// Checks whether an assignment's allocations exceed its funded hours.
///
/// Allocated hours are summed across every month. The overrun amount is
/// `allocated - funded`, clamped at zero. The percentage consumed is zero
/// when the assignment has no funded hours.
///
/// # Errors
///
/// - [`EngineError::NotFound`] if the assignment is unknown
/// - [`EngineError::InvalidInput`] if funded or allocated hours are negative, or
///   too large to aggregate
/// - Any error reported by the data source
///
/// # Example
///
/// ```
/// use allocation_engine::calculation::check_budget_overrun;
/// use allocation_engine::config::AllocationConfig;
/// use allocation_engine::models::{Assignment, Period};
/// use allocation_engine::source::InMemorySource;
/// use rust_decimal::Decimal;
///
/// let source = InMemorySource::new()
///     .with_assignment(Assignment {
///         id: "asg_001".to_string(),
///         employee_id: "emp_001".to_string(),
///         project_id: "prj_a".to_string(),
///         role: "Developer".to_string(),
///         labor_category: "Engineer II".to_string(),
///         funded_hours: Decimal::from(1000),
///     })
///     .with_allocation("asg_001", Period::new(2024, 11).unwrap(), Decimal::from(600))
///     .with_allocation("asg_001", Period::new(2024, 12).unwrap(), Decimal::from(600));
///
/// let result = check_budget_overrun(&source, &AllocationConfig::default(), "asg_001").unwrap();
/// assert!(result.is_overrun);
/// assert_eq!(result.overrun_hours, Decimal::from(200));
/// ```
pub fn check_budget_overrun<S: AllocationSource + ?Sized>(
    source: &S,
    config: &AllocationConfig,
    assignment_id: &str,
) -> EngineResult<OverrunResult> {
    let assignment = source
        .assignment(assignment_id)?
        .ok_or_else(|| EngineError::not_found("Assignment", assignment_id))?;

    evaluate_assignment(source, config, &assignment)
}

fn evaluate_assignment<S: AllocationSource + ?Sized>(
    source: &S,
    config: &AllocationConfig,
    assignment: &Assignment,
) -> EngineResult<OverrunResult> {
    ensure_non_negative(
        "funded_hours",
        &format!("assignment '{}'", assignment.id),
        assignment.funded_hours,
    )?;

    let mut allocated_hours = Decimal::ZERO;
    for row in source.allocations_for_assignment(&assignment.id)? {
        ensure_non_negative(
            "allocated_hours",
            &format!("assignment '{}' in {}", assignment.id, row.period),
            row.hours,
        )?;
        allocated_hours = add_hours("allocated_hours", allocated_hours, row.hours)?;
    }

    let funded_hours = assignment.funded_hours;
    let is_overrun = allocated_hours > funded_hours;
    let overrun_hours = if is_overrun {
        allocated_hours - funded_hours
    } else {
        Decimal::ZERO
    };
    let percentage_consumed = percentage(
        "allocated_hours",
        allocated_hours,
        funded_hours,
        config.percentage_precision(),
    )?;

    if is_overrun {
        warn!(
            assignment_id = %assignment.id,
            %funded_hours,
            %allocated_hours,
            %overrun_hours,
            "Assignment exceeds funded hours"
        );
    } else {
        debug!(
            assignment_id = %assignment.id,
            %funded_hours,
            %allocated_hours,
            "Assignment within funded hours"
        );
    }

    Ok(OverrunResult {
        assignment_id: assignment.id.clone(),
        funded_hours,
        allocated_hours,
        is_overrun,
        overrun_hours,
        percentage_consumed,
    })
}

/// Summarizes funded versus allocated hours across a project's assignments.
///
/// # Errors
///
/// - [`EngineError::NotFound`] if the project is unknown
/// - [`EngineError::InvalidInput`] if funded or allocated hours are negative, or
///   too large to aggregate
/// - Any error reported by the data source
pub fn summarize_project_budget<S: AllocationSource + ?Sized>(
    source: &S,
    config: &AllocationConfig,
    project_id: &str,
) -> EngineResult<ProjectBudgetSummary> {
    let project = source
        .project(project_id)?
        .ok_or_else(|| EngineError::not_found("Project", project_id))?;

    let mut total_funded_hours = Decimal::ZERO;
    let mut total_allocated_hours = Decimal::ZERO;
    let mut overrun_assignments = Vec::new();

    for assignment in source.assignments_for_project(project_id)? {
        let result = evaluate_assignment(source, config, &assignment)?;
        total_funded_hours = add_hours("funded_hours", total_funded_hours, result.funded_hours)?;
        total_allocated_hours =
            add_hours("allocated_hours", total_allocated_hours, result.allocated_hours)?;
        if result.is_overrun {
            overrun_assignments.push(result);
        }
    }

    let utilization_percentage = percentage(
        "allocated_hours",
        total_allocated_hours,
        total_funded_hours,
        config.percentage_precision(),
    )?;

    debug!(
        project_id,
        %total_funded_hours,
        %total_allocated_hours,
        %utilization_percentage,
        overruns = overrun_assignments.len(),
        "Summarized project budget"
    );

    Ok(ProjectBudgetSummary {
        project_id: project.id,
        project_name: project.name,
        total_funded_hours,
        total_allocated_hours,
        utilization_percentage,
        overrun_assignments,
    })
}
