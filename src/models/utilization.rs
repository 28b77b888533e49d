//! Utilization result models.
//!
//! This module contains the outputs of the aggregation operations: monthly
//! utilization summaries, conflict records, budget overrun checks, project
//! budget summaries and the portfolio roll-up.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Period;

/// One project's share of an employee's month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectUtilization {
    /// The project.
    pub project_id: String,
    /// Hours allocated to the project in the month.
    pub hours: Decimal,
    /// Share of the employee's total hours, as a percentage.
    pub percentage_of_total: Decimal,
    /// Full-time hours in effect for the project in the month.
    pub full_time_hours: Decimal,
    /// The project's contribution to the employee's FTE.
    pub fte: Decimal,
}

/// An employee's utilization for a single month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilizationResult {
    /// The employee.
    pub employee_id: String,
    /// The month summarized.
    pub period: Period,
    /// Hours allocated across all projects.
    pub total_hours: Decimal,
    /// Full-time equivalent fraction (1.0 = fully allocated).
    pub fte: Decimal,
    /// Per-project breakdown, ordered by project id.
    pub projects: Vec<ProjectUtilization>,
    /// True when the FTE exceeds 1.0.
    pub is_conflict: bool,
}

/// An over-allocated employee for a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictRecord {
    /// The employee.
    pub employee_id: String,
    /// The month in conflict.
    pub period: Period,
    /// The employee's FTE (greater than 1.0).
    pub fte: Decimal,
    /// Hours allocated across all projects.
    pub total_hours: Decimal,
    /// The projects contributing to the conflict.
    pub projects: Vec<ProjectUtilization>,
}

impl From<UtilizationResult> for ConflictRecord {
    fn from(result: UtilizationResult) -> Self {
        Self {
            employee_id: result.employee_id,
            period: result.period,
            fte: result.fte,
            total_hours: result.total_hours,
            projects: result.projects,
        }
    }
}

/// The budget position of a single assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrunResult {
    /// The assignment checked.
    pub assignment_id: String,
    /// The assignment's funded hours.
    pub funded_hours: Decimal,
    /// Hours allocated across all months.
    pub allocated_hours: Decimal,
    /// True when allocated hours exceed funded hours.
    pub is_overrun: bool,
    /// Allocated minus funded hours, clamped at zero.
    pub overrun_hours: Decimal,
    /// Allocated hours as a percentage of funded hours (zero when unfunded).
    pub percentage_consumed: Decimal,
}

/// Funded versus allocated hours across every assignment of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectBudgetSummary {
    /// The project.
    pub project_id: String,
    /// The project name.
    pub project_name: String,
    /// Funded hours summed over the project's assignments.
    pub total_funded_hours: Decimal,
    /// Allocated hours summed over the project's assignments.
    pub total_allocated_hours: Decimal,
    /// Allocated as a percentage of funded hours (zero when unfunded).
    pub utilization_percentage: Decimal,
    /// Assignments whose allocations exceed their funding.
    pub overrun_assignments: Vec<OverrunResult>,
}

/// An under-utilized employee for a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchRecord {
    /// The employee.
    pub employee_id: String,
    /// The employee's FTE (below the bench threshold).
    pub fte: Decimal,
    /// Hours allocated across all projects.
    pub total_hours: Decimal,
}

/// FTE and hours attributed to a role for a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleUtilization {
    /// The role name.
    pub role: String,
    /// Hours allocated under the role.
    pub hours: Decimal,
    /// Summed FTE contributions under the role.
    pub fte: Decimal,
}

/// Organization-wide roll-up for a single month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// The month summarized.
    pub period: Period,
    /// Number of employees with at least one allocation.
    pub employee_count: usize,
    /// Hours allocated across all employees.
    pub total_hours: Decimal,
    /// Mean employee FTE as a percentage.
    pub overall_utilization_percentage: Decimal,
    /// Employees above 100% FTE, highest first.
    pub over_allocated: Vec<ConflictRecord>,
    /// Employees below the bench threshold, lowest first.
    pub bench: Vec<BenchRecord>,
    /// FTE grouped by assignment role, ordered by role.
    pub fte_by_role: Vec<RoleUtilization>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> UtilizationResult {
        UtilizationResult {
            employee_id: "emp_001".to_string(),
            period: Period::new(2024, 11).unwrap(),
            total_hours: Decimal::from(220),
            fte: Decimal::new(13750, 4),
            projects: vec![ProjectUtilization {
                project_id: "prj_a".to_string(),
                hours: Decimal::from(220),
                percentage_of_total: Decimal::from(100),
                full_time_hours: Decimal::from(160),
                fte: Decimal::new(13750, 4),
            }],
            is_conflict: true,
        }
    }

    #[test]
    fn test_conflict_record_from_result() {
        let record = ConflictRecord::from(sample_result());
        assert_eq!(record.employee_id, "emp_001");
        assert_eq!(record.fte, Decimal::new(13750, 4));
        assert_eq!(record.total_hours, Decimal::from(220));
        assert_eq!(record.projects.len(), 1);
    }

    #[test]
    fn test_serialize_result_decimals_as_strings() {
        let json = serde_json::to_string(&sample_result()).unwrap();
        assert!(json.contains("\"fte\":\"1.3750\""));
        assert!(json.contains("\"is_conflict\":true"));
    }
}
