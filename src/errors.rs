//! Unified error type for the tracker.
//!
//! Resolver code never fails; everything here comes from configuration,
//! record validation, missing rows, or the database.

use thiserror::Error;

/// Every failure the crate reports.
#[derive(Debug, Error)]
pub enum Error {
    /// Status vocabulary or other configuration is unusable
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Read or write failure from the database
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// No live student with this ID
    #[error("Student not found: {id}")]
    StudentNotFound { id: i64 },

    /// No live application with this ID
    #[error("Application not found: {id}")]
    ApplicationNotFound { id: i64 },

    /// Status outside the configured vocabulary
    #[error("Invalid status '{status}'. Must be one of: {allowed}")]
    InvalidStatus { status: String, allowed: String },

    /// Intake that does not parse to a month and year
    #[error("Invalid intake '{intake}'. Expected a month and year such as 'Jan 2026'")]
    InvalidIntake { intake: String },

    /// Record input rejected before touching the database
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Some students in a bulk refresh could not be refreshed
    #[error("Failed to refresh {failed} of {attempted} students")]
    RefreshFailed { failed: usize, attempted: usize },
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
