//! Calculation logic for the allocation engine.
//!
//! This module contains the pure functions that turn allocation snapshots
//! into utilization figures: full-time hours resolution, per-employee monthly
//! summaries, organization-wide conflict detection, assignment and project
//! budget checks, employee timelines and the portfolio roll-up.
//!
//! Every function reads through an [`AllocationSource`](crate::source::AllocationSource)
//! and takes the [`AllocationConfig`](crate::config::AllocationConfig) explicitly.

mod budget;
mod conflicts;
mod full_time_hours;
mod hours;
mod monthly_summary;
mod portfolio;
mod timeline;

pub use budget::{check_budget_overrun, summarize_project_budget};
pub use conflicts::detect_organization_conflicts;
pub use full_time_hours::{FullTimeHoursSource, resolve_full_time_hours};
pub use monthly_summary::{FULL_TIME_FTE, compute_monthly_summary};
pub use portfolio::{UNASSIGNED_ROLE, portfolio_snapshot};
pub use timeline::employee_timeline;
