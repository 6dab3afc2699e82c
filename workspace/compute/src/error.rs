use chrono::NaiveDate;
use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// The referenced store does not exist. No partial result is produced.
    #[error("Store {0} not found")]
    StoreNotFound(i32),

    /// The reconciliation interval is inverted. The interval is never
    /// swapped or clamped on the caller's behalf.
    #[error("Invalid period: end {end} precedes start {start}")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
