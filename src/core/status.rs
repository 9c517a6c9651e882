//! Status vocabulary - The ordered set of application statuses and their weights.
//!
//! A higher weight means an application is further along. The dropped status is
//! a sentinel with weight 0 that never counts towards a student's summary.
//! Statuses outside the vocabulary also weigh 0 but are not treated as dropped.

use serde::Serialize;

/// Application is still being prepared.
pub const BUILDING_APPLICATION: &str = "Building Application";
/// Application has been sent to the university.
pub const APPLICATION_SUBMITTED: &str = "Application Submitted to University";
/// University made an offer.
pub const OFFER_RECEIVED: &str = "Offer Received";
/// Student accepted the offer.
pub const OFFER_ACCEPTED: &str = "Offer Accepted by Student";
/// Student visa granted.
pub const VISA_APPROVED: &str = "Visa Approved";
/// Application abandoned.
pub const DROPPED: &str = "Dropped";

/// A single named status and its weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusDefinition {
    /// Status label as stored on application rows
    pub name: String,
    /// Progression rank, higher is more advanced
    pub weight: u32,
}

/// Immutable status/weight table consulted by the resolver and by record
/// validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusVocabulary {
    statuses: Vec<StatusDefinition>,
    dropped: String,
}

impl StatusVocabulary {
    /// Builds a vocabulary from already-validated definitions.
    ///
    /// Definitions are kept sorted by weight so [`Self::progression`] is cheap;
    /// the sort is stable, so equal weights keep their given order.
    pub(crate) fn from_parts(mut statuses: Vec<StatusDefinition>, dropped: String) -> Self {
        statuses.sort_by_key(|definition| definition.weight);
        Self { statuses, dropped }
    }

    /// Weight of `status`, or 0 when it is not part of the vocabulary.
    #[must_use]
    pub fn weight(&self, status: &str) -> u32 {
        self.statuses
            .iter()
            .find(|definition| definition.name == status)
            .map_or(0, |definition| definition.weight)
    }

    /// Whether `status` is the dropped sentinel.
    #[must_use]
    pub fn is_dropped(&self, status: &str) -> bool {
        self.dropped == status
    }

    /// Whether `status` is a member of the vocabulary.
    #[must_use]
    pub fn is_valid(&self, status: &str) -> bool {
        self.statuses.iter().any(|definition| definition.name == status)
    }

    /// Label of the dropped sentinel.
    #[must_use]
    pub fn dropped(&self) -> &str {
        &self.dropped
    }

    /// Status labels ordered from least to most advanced.
    #[must_use]
    pub fn progression(&self) -> Vec<&str> {
        self.statuses
            .iter()
            .map(|definition| definition.name.as_str())
            .collect()
    }

    /// Status given to new applications that do not name one: the least
    /// advanced status that is not the dropped sentinel.
    #[must_use]
    pub fn default_status(&self) -> Option<&str> {
        self.statuses
            .iter()
            .map(|definition| definition.name.as_str())
            .find(|name| !self.is_dropped(name))
    }

    /// Comma separated list of valid statuses, used in validation messages.
    #[must_use]
    pub fn allowed_statuses(&self) -> String {
        self.progression().join(", ")
    }

    /// Whether an application may move from `current` to `new`.
    ///
    /// Dropping is always allowed, a dropped application stays dropped, and
    /// otherwise the status may only stay the same or move forward.
    #[must_use]
    pub fn can_transition(&self, current: &str, new: &str) -> bool {
        if self.is_dropped(new) {
            return true;
        }
        if self.is_dropped(current) {
            return false;
        }
        self.weight(new) >= self.weight(current)
    }
}

impl Default for StatusVocabulary {
    fn default() -> Self {
        let statuses = [
            (BUILDING_APPLICATION, 1),
            (APPLICATION_SUBMITTED, 2),
            (OFFER_RECEIVED, 3),
            (OFFER_ACCEPTED, 4),
            (VISA_APPROVED, 5),
            (DROPPED, 0),
        ]
        .into_iter()
        .map(|(name, weight)| StatusDefinition {
            name: name.to_string(),
            weight,
        })
        .collect();

        Self::from_parts(statuses, DROPPED.to_string())
    }
}
