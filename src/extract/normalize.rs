//! Best-effort 12-hour to 24-hour time conversion.

use chrono::format::{parse, Parsed, StrftimeItems};

/// Convert an "hour AM/PM" phrase to "HH:MM" 24-hour form.
///
/// Only the exact "hour(12h) meridiem" pattern converts ("5 PM" →
/// "17:00", "12 AM" → "00:00"). Anything else — already 24-hour,
/// minutes included, free text — is returned unchanged so the
/// permissive instant parse downstream gets a second chance. This makes
/// the function idempotent: its own "HH:MM" output no longer matches
/// the pattern.
pub fn to_24h(time_phrase: &str) -> String {
    let mut parsed = Parsed::new();
    if parse(&mut parsed, time_phrase, StrftimeItems::new("%I %p")).is_ok() {
        // the pattern carries no minutes; a bare hour means on the hour
        let _ = parsed.set_minute(0);
        if let Ok(time) = parsed.to_naive_time() {
            return time.format("%H:%M").to_string();
        }
    }
    time_phrase.to_string()
}
