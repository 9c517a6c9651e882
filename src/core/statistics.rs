//! Per-student application statistics.

use crate::{
    core::{
        application::list_by_student,
        intake::{format_intake, parse_intake},
        resolver::StatusResolver,
        student::get_student,
    },
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::collections::BTreeMap;

/// Breakdown of a student's live applications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplicationStatistics {
    /// Live applications of any status
    pub total_applications: usize,
    /// Live applications that are not dropped
    pub active_applications: usize,
    /// Live applications that are dropped
    pub dropped_applications: usize,
    /// Count of applications per status label
    pub status_breakdown: BTreeMap<String, usize>,
    /// Earliest parseable intake, formatted like `"Jan 2026"`
    pub earliest_intake: Option<String>,
    /// Latest parseable intake
    pub latest_intake: Option<String>,
    /// Summary status currently stored on the student
    pub highest_status: Option<String>,
    /// Summary intake currently stored on the student
    pub highest_intake: Option<String>,
}

/// Collects statistics over a student's live applications.
///
/// Intakes that cannot be parsed are left out of the earliest/latest range.
///
/// # Errors
/// Returns an error if the student does not exist or the queries fail.
pub async fn application_statistics(
    db: &DatabaseConnection,
    resolver: &StatusResolver,
    student_id: i64,
) -> Result<ApplicationStatistics> {
    let student = get_student(db, student_id)
        .await?
        .ok_or(Error::StudentNotFound { id: student_id })?;
    let applications = list_by_student(db, student_id, false).await?;

    let mut stats = ApplicationStatistics {
        total_applications: applications.len(),
        highest_status: student.highest_status,
        highest_intake: student.highest_intake,
        ..Default::default()
    };

    for application in &applications {
        *stats
            .status_breakdown
            .entry(application.status.clone())
            .or_insert(0) += 1;

        if resolver.vocabulary().is_dropped(&application.status) {
            stats.dropped_applications += 1;
        } else {
            stats.active_applications += 1;
        }
    }

    let intakes: Vec<_> = applications
        .iter()
        .map(|application| parse_intake(&application.intake))
        .filter(|date| !date.is_unparseable())
        .collect();
    let earliest = intakes.iter().min().copied();
    let latest = intakes.iter().max().copied();
    stats.earliest_intake = earliest.and_then(format_intake);
    stats.latest_intake = latest.and_then(format_intake);

    Ok(stats)
}
