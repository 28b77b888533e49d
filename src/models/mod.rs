//! Core data models for the allocation engine.
//!
//! This module contains the periods, the records read from the data store,
//! and the results produced by the calculations.

mod period;
mod records;
mod utilization;

pub use period::{MAX_YEAR, MIN_YEAR, Period, PeriodRange};
pub use records::{
    Allocation, Assignment, AssignmentAllocation, EmployeeAllocation, MonthlyHourOverride,
    PeriodAllocation, Project,
};
pub use utilization::{
    BenchRecord, ConflictRecord, OverrunResult, PortfolioSnapshot, ProjectBudgetSummary,
    ProjectUtilization, RoleUtilization, UtilizationResult,
};
