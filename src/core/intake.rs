//! Intake parsing - Turns free-text intakes like `"Jan 2026"` into comparable dates.
//!
//! Parsing never fails. Anything that is not a recognizable month followed by a
//! year between 2000 and 2100 becomes [`IntakeDate::UNPARSEABLE`], which sorts
//! after every real intake.

use chrono::Month;
use serde::Serialize;
use tracing::warn;

const MIN_YEAR: i32 = 2000;
const MAX_YEAR: i32 = 2100;

/// A parsed intake. Ordering is by year, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct IntakeDate {
    /// Calendar year
    pub year: i32,
    /// Month number, 1 through 12
    pub month: u32,
}

impl IntakeDate {
    /// Sentinel for missing or malformed intakes, later than any valid one.
    pub const UNPARSEABLE: Self = Self {
        year: 9999,
        month: 12,
    };

    /// Whether this is the sentinel rather than a real intake.
    #[must_use]
    pub fn is_unparseable(self) -> bool {
        self == Self::UNPARSEABLE
    }
}

/// Parses an intake string such as `"Jan 2026"` or `"September 2026"`.
///
/// The first token names the month (its first three letters are enough, in any
/// case), the last token is the year. Malformed input is logged and mapped to
/// [`IntakeDate::UNPARSEABLE`].
#[must_use]
pub fn parse_intake(text: &str) -> IntakeDate {
    // No intake recorded yet, nothing to warn about
    if text.is_empty() {
        return IntakeDate::UNPARSEABLE;
    }

    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() < 2 {
        warn!(intake = text, "Invalid intake format");
        return IntakeDate::UNPARSEABLE;
    }

    let month_token = parts[0];
    let Some(month) = parse_month(month_token) else {
        warn!(intake = text, month = month_token, "Invalid month in intake");
        return IntakeDate::UNPARSEABLE;
    };

    let year_token = parts[parts.len() - 1];
    match year_token.parse::<i32>() {
        Ok(year) if (MIN_YEAR..=MAX_YEAR).contains(&year) => IntakeDate {
            year,
            month: month.number_from_month(),
        },
        Ok(_) => {
            warn!(intake = text, year = year_token, "Intake year out of range");
            IntakeDate::UNPARSEABLE
        }
        Err(_) => {
            warn!(intake = text, year = year_token, "Invalid year format in intake");
            IntakeDate::UNPARSEABLE
        }
    }
}

/// Resolves a month token by its three-letter prefix, falling back to the full
/// token. Month names are matched case-insensitively.
fn parse_month(token: &str) -> Option<Month> {
    let prefix: String = token.chars().take(3).collect();
    prefix
        .parse::<Month>()
        .or_else(|_| token.parse::<Month>())
        .ok()
}

/// Whether `text` parses to a real intake.
#[must_use]
pub fn is_valid_intake(text: &str) -> bool {
    !parse_intake(text).is_unparseable()
}

/// Canonical `"Jan 2026"` rendering of a parsed intake; `None` for the sentinel.
#[must_use]
pub fn format_intake(date: IntakeDate) -> Option<String> {
    if date.is_unparseable() {
        return None;
    }
    let month = u8::try_from(date.month)
        .ok()
        .and_then(|number| Month::try_from(number).ok())?;
    Some(format!("{} {}", &month.name()[..3], date.year))
}
