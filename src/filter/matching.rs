//! Per-kind predicates for active filter fields and the free-text query.
//!
//! | Kind | An active filter passes when the record value... |
//! |------|--------------------------------------------------|
//! | `Text` | contains the filter text (case-insensitive) |
//! | `Select` | equals the selected option value exactly |
//! | `Date` | falls on the same calendar day |
//! | `Boolean` | is true |
//! | `Number` | is numerically equal |
//!
//! A record with no value for an active field never passes it.

use crate::model::{FieldKind, FilterValue};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub(crate) fn field_matches(
    kind: FieldKind,
    wanted: &FilterValue,
    actual: Option<&FilterValue>,
) -> bool {
    let Some(actual) = actual else {
        return false;
    };

    match kind {
        FieldKind::Text => {
            let needle = wanted.as_text().trim().to_lowercase();
            actual.as_text().to_lowercase().contains(&needle)
        }
        FieldKind::Select => actual.as_text() == wanted.as_text(),
        FieldKind::Date => dates_match(&wanted.as_text(), &actual.as_text()),
        FieldKind::Boolean => actual.as_bool() == Some(true),
        FieldKind::Number => match (wanted.as_number(), actual.as_number()) {
            (Some(a), Some(b)) => (a - b).abs() < f64::EPSILON,
            _ => false,
        },
    }
}

/// Case-insensitive substring match of `query` against any searchable string.
/// A blank query matches everything.
pub(crate) fn query_matches<S: AsRef<str>>(query: &str, searchable: &[S]) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    searchable
        .iter()
        .any(|s| s.as_ref().to_lowercase().contains(&needle))
}

fn dates_match(wanted: &str, actual: &str) -> bool {
    let wanted = wanted.trim();
    match (parse_day(wanted), parse_day(actual.trim())) {
        (Some(a), Some(b)) => a == b,
        // Unparseable dates still get a useful prefix match ("2024-03").
        _ => actual.trim().starts_with(wanted),
    }
}

pub(crate) fn parse_day(raw: &str) -> Option<NaiveDate> {
    if let Ok(day) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(day);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}
