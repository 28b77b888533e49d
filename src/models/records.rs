//! Records read from the external data store.
//!
//! These are plain snapshots of the entities owned by the persistence layer.
//! The engine never writes them back.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Period;

/// A project that employees are assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier for the project.
    pub id: String,
    /// Human-readable project name.
    pub name: String,
    /// Short project code (e.g., "ECOM-2024").
    pub code: String,
}

/// An employee's assignment to a project.
///
/// # Example
///
/// ```
/// use allocation_engine::models::Assignment;
/// use rust_decimal::Decimal;
///
/// let assignment = Assignment {
///     id: "asg_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     project_id: "prj_ecom".to_string(),
///     role: "Developer".to_string(),
///     labor_category: "Senior Engineer".to_string(),
///     funded_hours: Decimal::from(1000),
/// };
/// assert_eq!(assignment.funded_hours, Decimal::from(1000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Unique identifier for the assignment.
    pub id: String,
    /// The assigned employee.
    pub employee_id: String,
    /// The project the employee is assigned to.
    pub project_id: String,
    /// The role the employee plays on the project.
    pub role: String,
    /// The labor category (LCAT) the hours are billed under.
    pub labor_category: String,
    /// Budget ceiling in hours over the assignment's lifetime.
    pub funded_hours: Decimal,
}

/// Hours planned for an assignment in a single month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// The assignment these hours belong to.
    pub assignment_id: String,
    /// The month the hours are planned for.
    pub period: Period,
    /// The planned hours.
    pub allocated_hours: Decimal,
}

/// A project-specific replacement for the standard monthly full-time hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyHourOverride {
    /// The project the override applies to.
    pub project_id: String,
    /// The month the override applies to.
    pub period: Period,
    /// Full-time hours for that project in that month.
    pub overridden_hours: Decimal,
}

/// An allocation row for one employee in one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeAllocation {
    /// The project the hours are allocated to.
    pub project_id: String,
    /// The assignment the hours belong to.
    pub assignment_id: String,
    /// The allocated hours.
    pub hours: Decimal,
}

/// An allocation row for any employee in one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodAllocation {
    /// The employee the hours are allocated to.
    pub employee_id: String,
    /// The project the hours are allocated to.
    pub project_id: String,
    /// The assignment the hours belong to.
    pub assignment_id: String,
    /// The allocated hours.
    pub hours: Decimal,
}

/// An allocation row for one assignment in any period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentAllocation {
    /// The month the hours are planned for.
    pub period: Period,
    /// The allocated hours.
    pub hours: Decimal,
}
