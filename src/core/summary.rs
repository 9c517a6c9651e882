//! Summary refresh - Recomputes a student's highest status and intake.
//!
//! A refresh reads the student and its live applications and writes the
//! resolved summary back inside one database transaction. Any failure drops the
//! transaction, so the stored summary is either fully replaced or untouched.
//! Callers run a refresh after every application create, update and delete.

use crate::{
    core::{
        application::list_by_student,
        resolver::{StatusResolver, StatusSummary},
        student::save_summary,
    },
    entities::{SoftDelete, Student, student},
    errors::{Error, Result},
};
use sea_orm::{QuerySelect, TransactionTrait, prelude::*};
use serde::Serialize;
use tracing::{error, info};

/// Result of refreshing one student's summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshOutcome {
    /// Student whose summary was refreshed
    pub student_id: i64,
    /// Summary stored before the refresh
    pub previous: StatusSummary,
    /// Summary stored after the refresh
    pub updated: StatusSummary,
    /// Number of live applications considered
    pub applications_count: usize,
}

impl RefreshOutcome {
    /// Whether the stored summary actually changed.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.previous != self.updated
    }
}

/// A student whose refresh failed during a bulk run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshFailure {
    /// Student that could not be refreshed
    pub student_id: i64,
    /// Rendered error
    pub error: String,
}

/// Result of refreshing many students.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkRefreshReport {
    /// Number of students refreshed successfully
    pub succeeded: usize,
    /// Number of successful refreshes that changed the stored summary
    pub changed: usize,
    /// Students that failed, in the order they were attempted
    pub failures: Vec<RefreshFailure>,
}

impl BulkRefreshReport {
    /// Turns a report with failures into [`Error::RefreshFailed`].
    ///
    /// # Errors
    /// Returns an error if any student failed to refresh.
    pub fn ensure_success(&self) -> Result<()> {
        if self.failures.is_empty() {
            return Ok(());
        }
        Err(Error::RefreshFailed {
            failed: self.failures.len(),
            attempted: self.succeeded + self.failures.len(),
        })
    }
}

/// Recomputes and stores the summary for `student_id`.
///
/// The student row is selected `FOR UPDATE` where the backend supports it, so
/// concurrent refreshes of the same student serialize; `SQLite` serializes
/// writers on its own.
///
/// # Errors
/// Returns an error if:
/// - The student does not exist or is soft deleted (nothing is written)
/// - Reading applications or writing the student fails
pub async fn refresh_summary<C>(
    db: &C,
    resolver: &StatusResolver,
    student_id: i64,
) -> Result<RefreshOutcome>
where
    C: TransactionTrait,
{
    let txn = db.begin().await?;

    let student = Student::find_live()
        .filter(student::Column::Id.eq(student_id))
        .lock_exclusive()
        .one(&txn)
        .await?
        .ok_or(Error::StudentNotFound { id: student_id })?;

    let applications = list_by_student(&txn, student_id, false).await?;
    let updated = resolver.resolve(&applications);

    let previous = StatusSummary {
        highest_status: student.highest_status.clone(),
        highest_intake: student.highest_intake.clone(),
    };

    save_summary(&txn, student, updated.clone()).await?;
    txn.commit().await?;

    info!(
        student_id,
        old_status = ?previous.highest_status,
        new_status = ?updated.highest_status,
        old_intake = ?previous.highest_intake,
        new_intake = ?updated.highest_intake,
        "Updated student summary"
    );

    Ok(RefreshOutcome {
        student_id,
        previous,
        updated,
        applications_count: applications.len(),
    })
}

/// Refreshes every student in `student_ids`, each in its own transaction.
///
/// Failures are collected rather than returned, so one bad student does not
/// stop the run.
pub async fn refresh_summaries<C>(
    db: &C,
    resolver: &StatusResolver,
    student_ids: &[i64],
) -> BulkRefreshReport
where
    C: TransactionTrait,
{
    info!("Bulk refreshing {} students", student_ids.len());

    let mut report = BulkRefreshReport::default();
    for &student_id in student_ids {
        match refresh_summary(db, resolver, student_id).await {
            Ok(outcome) => {
                report.succeeded += 1;
                if outcome.changed() {
                    report.changed += 1;
                }
            }
            Err(e) => {
                error!(student_id, "Failed to refresh student summary: {e}");
                report.failures.push(RefreshFailure {
                    student_id,
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        succeeded = report.succeeded,
        failed = report.failures.len(),
        "Bulk refresh completed"
    );
    report
}

/// Formats a bulk refresh report into a human-readable summary.
#[must_use]
pub fn format_refresh_report(report: &BulkRefreshReport) -> String {
    use std::fmt::Write;

    let mut summary = format!(
        "Refreshed {} students ({} changed), {} failed\n",
        report.succeeded,
        report.changed,
        report.failures.len()
    );

    for failure in &report.failures {
        // Writing to a String cannot fail
        let _ = writeln!(summary, "  student {}: {}", failure.student_id, failure.error);
    }

    summary
}
