//! In-memory allocation source.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Allocation, Assignment, AssignmentAllocation, EmployeeAllocation, MonthlyHourOverride,
    Period, PeriodAllocation, Project,
};

use super::AllocationSource;

/// A snapshot of the data store held in memory.
///
/// Rows are kept in insertion order and queries return them in that order.
/// When several overrides exist for the same project and month, the first
/// one wins.
///
/// # Example
///
/// ```
/// use allocation_engine::models::{Assignment, Period};
/// use allocation_engine::source::{AllocationSource, InMemorySource};
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
///     .with_allocation("asg_001", Period::new(2024, 11).unwrap(), Decimal::from(160));
///
/// let rows = source
///     .allocations_for_employee_in_period("emp_001", Period::new(2024, 11).unwrap())
///     .unwrap();
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].project_id, "prj_a");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemorySource {
    /// Employees known to the store, in addition to those with assignments.
    #[serde(default)]
    pub employees: Vec<String>,
    /// Projects.
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Assignments.
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    /// Monthly allocations.
    #[serde(default)]
    pub allocations: Vec<Allocation>,
    /// Monthly full-time-hours overrides.
    #[serde(default)]
    pub overrides: Vec<MonthlyHourOverride>,
}

impl InMemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a snapshot from a JSON file with the same shape as this struct.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| EngineError::DataSource {
            message: format!("failed to read snapshot '{}': {}", path.display(), e),
        })?;
        let source: Self = serde_json::from_str(&content).map_err(|e| EngineError::DataSource {
            message: format!("failed to parse snapshot '{}': {}", path.display(), e),
        })?;

        debug!(
            path = %path.display(),
            assignments = source.assignments.len(),
            allocations = source.allocations.len(),
            overrides = source.overrides.len(),
            "Loaded allocation snapshot"
        );

        Ok(source)
    }

    /// Registers an employee with no assignments.
    pub fn with_employee(mut self, employee_id: impl Into<String>) -> Self {
        self.employees.push(employee_id.into());
        self
    }

    /// Adds a project.
    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.push(project);
        self
    }

    /// Adds an assignment.
    pub fn with_assignment(mut self, assignment: Assignment) -> Self {
        self.assignments.push(assignment);
        self
    }

    /// Adds an allocation of `hours` to an assignment for a month.
    pub fn with_allocation(
        mut self,
        assignment_id: impl Into<String>,
        period: Period,
        hours: Decimal,
    ) -> Self {
        self.allocations.push(Allocation {
            assignment_id: assignment_id.into(),
            period,
            allocated_hours: hours,
        });
        self
    }

    /// Adds a full-time-hours override for a project and month.
    pub fn with_override(
        mut self,
        project_id: impl Into<String>,
        period: Period,
        overridden_hours: Decimal,
    ) -> Self {
        self.overrides.push(MonthlyHourOverride {
            project_id: project_id.into(),
            period,
            overridden_hours,
        });
        self
    }

    fn assignment_index(&self) -> HashMap<&str, &Assignment> {
        self.assignments.iter().map(|a| (a.id.as_str(), a)).collect()
    }

    /// Resolves the assignment behind an allocation row.
    fn owning_assignment<'a>(
        index: &HashMap<&str, &'a Assignment>,
        allocation: &Allocation,
    ) -> EngineResult<&'a Assignment> {
        index
            .get(allocation.assignment_id.as_str())
            .copied()
            .ok_or_else(|| EngineError::DataSource {
                message: format!(
                    "allocation for {} references unknown assignment '{}'",
                    allocation.period, allocation.assignment_id
                ),
            })
    }
}

impl AllocationSource for InMemorySource {
    fn allocations_for_employee_in_period(
        &self,
        employee_id: &str,
        period: Period,
    ) -> EngineResult<Vec<EmployeeAllocation>> {
        let index = self.assignment_index();
        let mut rows = Vec::new();
        for allocation in self.allocations.iter().filter(|a| a.period == period) {
            let assignment = Self::owning_assignment(&index, allocation)?;
            if assignment.employee_id == employee_id {
                rows.push(EmployeeAllocation {
                    project_id: assignment.project_id.clone(),
                    assignment_id: assignment.id.clone(),
                    hours: allocation.allocated_hours,
                });
            }
        }
        Ok(rows)
    }

    fn allocations_in_period(&self, period: Period) -> EngineResult<Vec<PeriodAllocation>> {
        let index = self.assignment_index();
        self.allocations
            .iter()
            .filter(|a| a.period == period)
            .map(|allocation| {
                let assignment = Self::owning_assignment(&index, allocation)?;
                Ok(PeriodAllocation {
                    employee_id: assignment.employee_id.clone(),
                    project_id: assignment.project_id.clone(),
                    assignment_id: assignment.id.clone(),
                    hours: allocation.allocated_hours,
                })
            })
            .collect()
    }

    fn monthly_override(&self, project_id: &str, period: Period) -> EngineResult<Option<Decimal>> {
        Ok(self
            .overrides
            .iter()
            .find(|o| o.project_id == project_id && o.period == period)
            .map(|o| o.overridden_hours))
    }

    fn assignment(&self, assignment_id: &str) -> EngineResult<Option<Assignment>> {
        Ok(self
            .assignments
            .iter()
            .find(|a| a.id == assignment_id)
            .cloned())
    }

    fn allocations_for_assignment(
        &self,
        assignment_id: &str,
    ) -> EngineResult<Vec<AssignmentAllocation>> {
        let mut rows: Vec<AssignmentAllocation> = self
            .allocations
            .iter()
            .filter(|a| a.assignment_id == assignment_id)
            .map(|a| AssignmentAllocation {
                period: a.period,
                hours: a.allocated_hours,
            })
            .collect();
        rows.sort_by_key(|r| r.period);
        Ok(rows)
    }

    fn project(&self, project_id: &str) -> EngineResult<Option<Project>> {
        Ok(self.projects.iter().find(|p| p.id == project_id).cloned())
    }

    fn assignments_for_project(&self, project_id: &str) -> EngineResult<Vec<Assignment>> {
        Ok(self
            .assignments
            .iter()
            .filter(|a| a.project_id == project_id)
            .cloned()
            .collect())
    }

    fn employee_exists(&self, employee_id: &str) -> EngineResult<bool> {
        Ok(self.employees.iter().any(|e| e == employee_id)
            || self.assignments.iter().any(|a| a.employee_id == employee_id))
    }
}
