//! Shared handle for running aggregations.
//!
//! [`AllocationAggregator`] bundles a data source and a configuration so a
//! reporting or API layer can hold one value and call every operation on it.

use std::sync::Arc;

use crate::calculation;
use crate::config::AllocationConfig;
use crate::error::EngineResult;
use crate::models::{
    ConflictRecord, OverrunResult, PeriodRange, PortfolioSnapshot, ProjectBudgetSummary,
    UtilizationResult,
};
use crate::source::AllocationSource;

/// Cloneable entry point to the allocation calculations.
///
/// Holds no mutable state; clones share the same source and configuration.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use allocation_engine::AllocationAggregator;
/// use allocation_engine::config::AllocationConfig;
/// use allocation_engine::source::InMemorySource;
///
/// let aggregator = AllocationAggregator::new(
///     Arc::new(InMemorySource::new()),
///     AllocationConfig::default(),
/// );
/// let summary = aggregator.compute_monthly_summary("emp_001", 2024, 11).unwrap();
/// assert!(!summary.is_conflict);
/// ```
#[derive(Clone)]
pub struct AllocationAggregator {
    source: Arc<dyn AllocationSource>,
    config: Arc<AllocationConfig>,
}

impl AllocationAggregator {
    /// Creates an aggregator over the given source and configuration.
    pub fn new(source: Arc<dyn AllocationSource>, config: AllocationConfig) -> Self {
        Self {
            source,
            config: Arc::new(config),
        }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// See [`calculation::compute_monthly_summary`].
    pub fn compute_monthly_summary(
        &self,
        employee_id: &str,
        year: i32,
        month: u32,
    ) -> EngineResult<UtilizationResult> {
        calculation::compute_monthly_summary(
            self.source.as_ref(),
            &self.config,
            employee_id,
            year,
            month,
        )
    }

    /// See [`calculation::detect_organization_conflicts`].
    pub fn detect_organization_conflicts(
        &self,
        year: i32,
        month: u32,
    ) -> EngineResult<Vec<ConflictRecord>> {
        calculation::detect_organization_conflicts(self.source.as_ref(), &self.config, year, month)
    }

    /// See [`calculation::check_budget_overrun`].
    pub fn check_budget_overrun(&self, assignment_id: &str) -> EngineResult<OverrunResult> {
        calculation::check_budget_overrun(self.source.as_ref(), &self.config, assignment_id)
    }

    /// See [`calculation::summarize_project_budget`].
    pub fn summarize_project_budget(&self, project_id: &str) -> EngineResult<ProjectBudgetSummary> {
        calculation::summarize_project_budget(self.source.as_ref(), &self.config, project_id)
    }

    /// See [`calculation::employee_timeline`].
    pub fn employee_timeline(
        &self,
        employee_id: &str,
        range: PeriodRange,
    ) -> EngineResult<Vec<UtilizationResult>> {
        calculation::employee_timeline(self.source.as_ref(), &self.config, employee_id, range)
    }

    /// See [`calculation::portfolio_snapshot`].
    pub fn portfolio_snapshot(&self, year: i32, month: u32) -> EngineResult<PortfolioSnapshot> {
        calculation::portfolio_snapshot(self.source.as_ref(), &self.config, year, month)
    }
}
