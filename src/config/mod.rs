//! Configuration loading and management for the allocation engine.
//!
//! This module loads the organization-wide standard full-time hours and the
//! rounding and bench thresholds from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use allocation_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap().into_config();
//! println!("Standard monthly hours: {}", config.standard_monthly_hours());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AllocationConfig, DEFAULT_BENCH_THRESHOLD, DEFAULT_FTE_PRECISION,
    DEFAULT_PERCENTAGE_PRECISION, DEFAULT_STANDARD_MONTHLY_HOURS, OrganizationConfig,
    OrganizationMetadata, ThresholdsConfig,
};
