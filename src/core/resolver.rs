//! Highest-status resolution over a student's applications.
//!
//! The resolver is pure: it looks only at the records it is handed and the
//! vocabulary it was built with. Malformed statuses and intakes degrade (weight
//! 0, latest possible intake) rather than fail.
//!
//! Selection rules:
//! 1. Dropped and soft-deleted records are never eligible.
//! 2. The eligible records with the largest status weight are candidates.
//! 3. Among several candidates the earliest parsed intake wins.
//! 4. If candidates also share the same parsed intake, the first one in input
//!    order wins. Callers wanting an order-independent result must pass records
//!    in a stable order (the repository loads them by ascending id).

use crate::core::{intake::parse_intake, status::StatusVocabulary};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Anything that can take part in status resolution.
pub trait ApplicationRecord {
    /// Status label, ideally from the vocabulary
    fn status(&self) -> &str;
    /// Free-text intake such as `"Jan 2026"`
    fn intake(&self) -> &str;
    /// Soft delete flag
    fn is_deleted(&self) -> bool;
}

/// Plain in-memory application record, for callers that do not hold entity
/// models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSnapshot {
    /// Status label
    pub status: String,
    /// Intake text
    pub intake: String,
    /// Soft delete flag
    #[serde(default)]
    pub is_deleted: bool,
}

impl ApplicationSnapshot {
    /// A live (not deleted) record.
    pub fn new(status: impl Into<String>, intake: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            intake: intake.into(),
            is_deleted: false,
        }
    }
}

impl ApplicationRecord for ApplicationSnapshot {
    fn status(&self) -> &str {
        &self.status
    }

    fn intake(&self) -> &str {
        &self.intake
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }
}

/// The derived `(status, intake)` pair stored on a student.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    /// Most advanced eligible status, `None` when nothing is eligible
    pub highest_status: Option<String>,
    /// Intake of the application that produced `highest_status`
    pub highest_intake: Option<String>,
}

impl StatusSummary {
    /// Summary for a student with no eligible applications.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            highest_status: None,
            highest_intake: None,
        }
    }

    fn from_record<R: ApplicationRecord>(record: &R) -> Self {
        Self {
            highest_status: Some(record.status().to_string()),
            highest_intake: Some(record.intake().to_string()),
        }
    }
}

/// Computes a student's summary using an immutable status vocabulary.
#[derive(Debug, Clone, Default)]
pub struct StatusResolver {
    vocabulary: StatusVocabulary,
}

impl StatusResolver {
    /// Creates a resolver over `vocabulary`.
    #[must_use]
    pub const fn new(vocabulary: StatusVocabulary) -> Self {
        Self { vocabulary }
    }

    /// The vocabulary this resolver ranks statuses with.
    #[must_use]
    pub const fn vocabulary(&self) -> &StatusVocabulary {
        &self.vocabulary
    }

    /// Whether `record` can contribute to a summary.
    pub fn is_eligible<R: ApplicationRecord>(&self, record: &R) -> bool {
        !record.is_deleted() && !self.vocabulary.is_dropped(record.status())
    }

    /// Picks the record that determines the summary, if any.
    pub fn select<'a, R: ApplicationRecord>(&self, applications: &'a [R]) -> Option<&'a R> {
        let eligible: Vec<&R> = applications
            .iter()
            .filter(|record| self.is_eligible(*record))
            .collect();

        let max_weight = eligible
            .iter()
            .map(|record| self.vocabulary.weight(record.status()))
            .max()?;

        let candidates: Vec<&R> = eligible
            .into_iter()
            .filter(|record| self.vocabulary.weight(record.status()) == max_weight)
            .collect();

        if candidates.len() > 1 {
            debug!(
                candidates = candidates.len(),
                max_weight, "Breaking status tie by earliest intake"
            );
        }

        // `min_by_key` keeps the first of several equal minima.
        candidates
            .into_iter()
            .min_by_key(|record| parse_intake(record.intake()))
    }

    /// Resolves the highest status and its intake.
    ///
    /// Returns [`StatusSummary::empty`] when `applications` is empty or every
    /// record is dropped or deleted.
    pub fn resolve<R: ApplicationRecord>(&self, applications: &[R]) -> StatusSummary {
        let summary = self
            .select(applications)
            .map_or_else(StatusSummary::empty, StatusSummary::from_record);

        debug!(
            applications = applications.len(),
            highest_status = ?summary.highest_status,
            highest_intake = ?summary.highest_intake,
            "Resolved status summary"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::status::{
        APPLICATION_SUBMITTED, BUILDING_APPLICATION, DROPPED, OFFER_ACCEPTED, OFFER_RECEIVED,
        VISA_APPROVED,
    };

    fn app(status: &str, intake: &str) -> ApplicationSnapshot {
        ApplicationSnapshot::new(status, intake)
    }

    fn deleted(status: &str, intake: &str) -> ApplicationSnapshot {
        ApplicationSnapshot {
            is_deleted: true,
            ..app(status, intake)
        }
    }

    fn summary(status: &str, intake: &str) -> StatusSummary {
        StatusSummary {
            highest_status: Some(status.to_string()),
            highest_intake: Some(intake.to_string()),
        }
    }

    #[test]
    fn test_empty_input() {
        let resolver = StatusResolver::default();
        let applications: Vec<ApplicationSnapshot> = Vec::new();

        assert_eq!(resolver.resolve(&applications), StatusSummary::empty());
    }

    #[test]
    fn test_single_application() {
        let resolver = StatusResolver::default();

        assert_eq!(
            resolver.resolve(&[app(BUILDING_APPLICATION, "Jan 2026")]),
            summary(BUILDING_APPLICATION, "Jan 2026")
        );
    }

    #[test]
    fn test_highest_weight_wins() {
        let resolver = StatusResolver::default();
        let applications = [
            app(BUILDING_APPLICATION, "Jan 2026"),
            app(OFFER_RECEIVED, "Feb 2026"),
            app(APPLICATION_SUBMITTED, "Mar 2026"),
        ];

        assert_eq!(
            resolver.resolve(&applications),
            summary(OFFER_RECEIVED, "Feb 2026")
        );
    }

    #[test]
    fn test_tie_breaks_on_earliest_intake() {
        let resolver = StatusResolver::default();
        let applications = [
            app(OFFER_RECEIVED, "Sep 2026"),
            app(OFFER_RECEIVED, "Jan 2026"),
        ];

        assert_eq!(
            resolver.resolve(&applications),
            summary(OFFER_RECEIVED, "Jan 2026")
        );
    }

    #[test]
    fn test_tie_break_compares_year_before_month() {
        let resolver = StatusResolver::default();
        let applications = [
            app(VISA_APPROVED, "Jan 2027"),
            app(VISA_APPROVED, "December 2026"),
        ];

        assert_eq!(
            resolver.resolve(&applications),
            summary(VISA_APPROVED, "December 2026")
        );
    }

    #[test]
    fn test_tie_with_malformed_intake_prefers_valid_one() {
        let resolver = StatusResolver::default();
        let applications = [
            app(OFFER_ACCEPTED, "sometime soon"),
            app(OFFER_ACCEPTED, "Nov 2030"),
        ];

        assert_eq!(
            resolver.resolve(&applications),
            summary(OFFER_ACCEPTED, "Nov 2030")
        );
    }

    #[test]
    fn test_identical_intakes_keep_input_order() {
        let resolver = StatusResolver::default();
        let applications = [
            app(OFFER_RECEIVED, "Sep 2026"),
            app(OFFER_RECEIVED, "September 2026"),
        ];

        assert_eq!(
            resolver.resolve(&applications),
            summary(OFFER_RECEIVED, "Sep 2026")
        );

        let reversed = [applications[1].clone(), applications[0].clone()];
        assert_eq!(
            resolver.resolve(&reversed),
            summary(OFFER_RECEIVED, "September 2026")
        );
    }

    #[test]
    fn test_all_dropped() {
        let resolver = StatusResolver::default();
        let applications = [app(DROPPED, "Jan 2026"), app(DROPPED, "Feb 2026")];

        assert_eq!(resolver.resolve(&applications), StatusSummary::empty());
    }

    #[test]
    fn test_dropped_excluded_from_normal_set() {
        let resolver = StatusResolver::default();
        let applications = [app(DROPPED, "Jan 2026"), app(OFFER_RECEIVED, "Feb 2026")];

        assert_eq!(
            resolver.resolve(&applications),
            summary(OFFER_RECEIVED, "Feb 2026")
        );
    }

    #[test]
    fn test_deleted_records_are_ignored() {
        let resolver = StatusResolver::default();
        let applications = [
            deleted(VISA_APPROVED, "Jan 2026"),
            app(APPLICATION_SUBMITTED, "Mar 2026"),
        ];

        assert_eq!(
            resolver.resolve(&applications),
            summary(APPLICATION_SUBMITTED, "Mar 2026")
        );

        let only_deleted = [deleted(VISA_APPROVED, "Jan 2026"), deleted(DROPPED, "Feb 2026")];
        assert_eq!(resolver.resolve(&only_deleted), StatusSummary::empty());
    }

    #[test]
    fn test_unknown_status_is_eligible_with_zero_weight() {
        let resolver = StatusResolver::default();

        // Alone it still produces a summary
        assert_eq!(
            resolver.resolve(&[app("Waitlisted", "Jan 2026")]),
            summary("Waitlisted", "Jan 2026")
        );

        // Any known status outranks it
        let applications = [
            app("Waitlisted", "Jan 2026"),
            app(BUILDING_APPLICATION, "Jun 2027"),
        ];
        assert_eq!(
            resolver.resolve(&applications),
            summary(BUILDING_APPLICATION, "Jun 2027")
        );
    }

    #[test]
    fn test_adding_lower_weight_application_does_not_change_result() {
        let resolver = StatusResolver::default();
        let mut applications = vec![
            app(OFFER_ACCEPTED, "Sep 2026"),
            app(APPLICATION_SUBMITTED, "Jan 2026"),
        ];
        let before = resolver.resolve(&applications);

        applications.push(app(OFFER_RECEIVED, "Jan 2025"));
        applications.push(app(BUILDING_APPLICATION, "Jan 2024"));

        assert_eq!(resolver.resolve(&applications), before);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let resolver = StatusResolver::default();
        let applications = [
            app(OFFER_RECEIVED, "Sep 2026"),
            app(DROPPED, "Jan 2026"),
            app(OFFER_RECEIVED, "Mar 2026"),
        ];

        assert_eq!(resolver.resolve(&applications), resolver.resolve(&applications));
    }

    #[test]
    fn test_select_returns_source_record() {
        let resolver = StatusResolver::default();
        let applications = [app(OFFER_RECEIVED, "Sep 2026"), app(VISA_APPROVED, "Jan 2027")];

        let selected = resolver.select(&applications);
        assert!(selected.is_some_and(|record| std::ptr::eq(record, &applications[1])));
    }
}
