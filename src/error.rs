//! Error types for the allocation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while aggregating allocations.

use thiserror::Error;

/// The main error type for the allocation engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use allocation_engine::error::EngineError;
///
/// let error = EngineError::InvalidPeriod { year: 2024, month: 13 };
/// assert_eq!(error.to_string(), "Invalid period: 2024-13");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The year or month is outside the supported domain.
    #[error("Invalid period: {year}-{month:02}")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// An input value (hours, overrides) was outside its valid range.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A referenced entity does not exist in the data source.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g., "Assignment").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but contained an unusable value.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The configuration field.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// The external data source failed to answer a read.
    #[error("Data source error: {message}")]
    DataSource {
        /// A description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Builds a [`EngineError::NotFound`] for the given entity kind and id.
    pub fn not_found(entity: &str, id: impl Into<String>) -> Self {
        EngineError::NotFound {
            entity: entity.to_string(),
            id: id.into(),
        }
    }

    /// Builds a [`EngineError::InvalidInput`] for the given field.
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
