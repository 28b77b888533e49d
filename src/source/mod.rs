//! Read-only access to the allocation data store.
//!
//! The engine owns no persistent state. Every calculation reads snapshots
//! through the [`AllocationSource`] trait, which a persistence layer
//! implements. [`InMemorySource`] is a `Vec`-backed implementation used for
//! fixtures, tests and offline analysis of exported snapshots.

mod memory;

pub use memory::InMemorySource;

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{
    Assignment, AssignmentAllocation, EmployeeAllocation, Period, PeriodAllocation, Project,
};

/// Trait for the read operations the engine needs from the data store.
///
/// Implementations report their own failures as
/// [`EngineError::DataSource`](crate::error::EngineError::DataSource).
pub trait AllocationSource: Send + Sync {
    /// Allocation rows for one employee in one month, across all assignments.
    fn allocations_for_employee_in_period(
        &self,
        employee_id: &str,
        period: Period,
    ) -> EngineResult<Vec<EmployeeAllocation>>;

    /// Allocation rows for every employee in one month.
    fn allocations_in_period(&self, period: Period) -> EngineResult<Vec<PeriodAllocation>>;

    /// The full-time-hours override for a project in a month, if any.
    fn monthly_override(&self, project_id: &str, period: Period) -> EngineResult<Option<Decimal>>;

    /// Looks up an assignment by id.
    fn assignment(&self, assignment_id: &str) -> EngineResult<Option<Assignment>>;

    /// Allocation rows for one assignment across every month.
    fn allocations_for_assignment(
        &self,
        assignment_id: &str,
    ) -> EngineResult<Vec<AssignmentAllocation>>;

    /// Looks up a project by id.
    fn project(&self, project_id: &str) -> EngineResult<Option<Project>>;

    /// All assignments on a project.
    fn assignments_for_project(&self, project_id: &str) -> EngineResult<Vec<Assignment>>;

    /// Returns true if the employee is known to the data store.
    fn employee_exists(&self, employee_id: &str) -> EngineResult<bool>;
}
