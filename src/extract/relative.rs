//! Resolution of relative date/time qualifiers.

use chrono::{Days, NaiveDate};

/// The only relative token the resolver understands
const TOMORROW: &str = "tomorrow";

/// Resolve a date phrase against a reference date.
///
/// Exactly the literal "tomorrow" (no fuzzy matching) becomes the day
/// after `today` as "YYYY-MM-DD"; anything else passes through unchanged
/// for the permissive instant parse to handle.
pub fn resolve_date(phrase: &str, today: NaiveDate) -> String {
    if phrase == TOMORROW {
        (today + Days::new(1)).format("%Y-%m-%d").to_string()
    } else {
        phrase.to_string()
    }
}

/// Strip a relative qualifier out of a time phrase.
///
/// A "tomorrow" embedded in the time phrase is removed (with surrounding
/// whitespace) and forces the date to be recomputed as tomorrow — even
/// when the date phrase was already independently resolved. The time
/// phrase's qualifier takes precedence.
pub fn strip_relative_time(
    time_phrase: Option<&str>,
    date_phrase: &str,
    today: NaiveDate,
) -> (Option<String>, String) {
    match time_phrase {
        Some(time) if time.contains(TOMORROW) => {
            let stripped = time.replace(TOMORROW, "").trim().to_string();
            (Some(stripped), resolve_date(TOMORROW, today))
        }
        _ => (
            time_phrase.map(str::to_string),
            date_phrase.to_string(),
        ),
    }
}
