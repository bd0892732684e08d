//! Error types for the foothold library.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for every plan, target, journey and generation operation.
#[derive(Error, Debug)]
pub enum FootholdError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: u64 },
    /// Target not found for the given ID
    #[error("Target with ID {id} not found")]
    TargetNotFound { id: u64 },
    /// Journey not found for the given ID
    #[error("Journey with ID {id} not found")]
    JourneyNotFound { id: u64 },
    /// The journey no longer accepts trace points
    #[error("Journey {id} is closed and no longer records positions")]
    JourneyClosed { id: u64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// The device position could not be determined in time
    #[error("Current location is unavailable")]
    LocationUnavailable,
    /// Another generation run already holds this plan
    #[error("Plan {plan_id} is already being generated")]
    GenerationInProgress { plan_id: u64 },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> FootholdError {
        FootholdError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> FootholdError {
        FootholdError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl FootholdError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a join failure from a blocking store task.
    pub(crate) fn task_join(error: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {error}"),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| FootholdError::database(message).with_source(e))
    }
}

/// Result type alias for foothold operations
pub type Result<T> = std::result::Result<T, FootholdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_builder_keeps_message() {
        let err = FootholdError::database("Failed to insert target")
            .with_source(rusqlite::Error::QueryReturnedNoRows);
        assert!(err.to_string().contains("Failed to insert target"));
    }

    #[test]
    fn test_invalid_input_builder() {
        let err = FootholdError::invalid_input("wait_time_seconds").with_reason("must be >= 0");
        match err {
            FootholdError::InvalidInput { field, reason } => {
                assert_eq!(field, "wait_time_seconds");
                assert_eq!(reason, "must be >= 0");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_db_context_maps_rusqlite_error() {
        let result: std::result::Result<(), rusqlite::Error> =
            Err(rusqlite::Error::QueryReturnedNoRows);
        let mapped = result.db_context("Failed to read plan");
        assert!(matches!(mapped, Err(FootholdError::Database { .. })));
    }
}
