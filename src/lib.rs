//! Allocation engine for staffing and resource planning.
//!
//! This crate aggregates an employee's planned hours across every project
//! assignment for a month, expresses them as a full-time equivalent (FTE)
//! fraction, flags over-allocation conflicts (> 100% FTE) and checks
//! assignments against their funded hours.

#![warn(missing_docs)]

pub mod aggregator;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod source;

pub use aggregator::AllocationAggregator;
