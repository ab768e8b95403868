//! Custom error types for the common library
//!
//! Every store, whether backed by PostgreSQL or held in memory, reports
//! failures through [`DatabaseError`] so callers can map them uniformly.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// A row could not be turned into a domain value
    #[error("Database decode error: {0}")]
    Decode(String),

    /// A uniqueness constraint rejected the write
    #[error("Database conflict: {0}")]
    Conflict(String),

    /// The store refused to serve the request
    #[error("Database unavailable: {0}")]
    Unavailable(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

impl DatabaseError {
    /// Classify a query error, surfacing unique violations as [`DatabaseError::Conflict`]
    pub fn from_query(err: SqlxError) -> Self {
        if let SqlxError::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return DatabaseError::Conflict(db_err.message().to_string());
            }
        }
        DatabaseError::Query(err)
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
