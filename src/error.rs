//! Error types for the compensation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing and persisting
//! salary records.

use thiserror::Error;

/// The main error type for the compensation engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application. Batch
/// operations (rollover, reconciliation) never let these errors cross the
/// host boundary; they log each failed unit of work and report a coarse
/// success flag instead.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
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

    /// A period string was neither canonical ("January 2024") nor legacy
    /// numeric ("2024-01").
    #[error("Invalid period key '{value}': {message}")]
    InvalidPeriod {
        /// The raw period string that failed to parse.
        value: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// No employee exists with the given identifier.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The identifier that was looked up.
        employee_id: String,
    },

    /// A backing store (directory, ledger, or trusted clock) failed.
    #[error("Data access failure in {store}: {message}")]
    DataAccess {
        /// The store that failed (e.g. "directory", "ledger", "clock").
        store: String,
        /// A description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Creates a `DataAccess` error for the named store.
    pub fn data_access(store: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DataAccess {
            store: store.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
