//! Permissive free-text parsing of a combined date/time string.

use chrono::format::{parse, Parsed, StrftimeItems};
use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Date + time forms, tried in order
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %I:%M %p",
    "%Y-%m-%d %I %p",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %I %p",
];

/// Date-only forms: a time phrase that reduced to nothing means midnight
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Month-name forms carry no year; the reference year is prepended
const YEARLESS_FORMATS: &[&str] = &[
    "%Y %B %d %H:%M",
    "%Y %B %d %I:%M %p",
    "%Y %B %d %I %p",
    "%Y %d %B %H:%M",
    "%Y %d %B %I:%M %p",
    "%Y %d %B %I %p",
    "%Y %B %d",
    "%Y %d %B",
];

/// Parse a combined "date time" string into a naive local instant.
///
/// Handles the already-normalized output of the earlier pipeline steps
/// ("2024-03-05 17:00") as well as residual free text they left alone
/// ("2024-03-05 5 pm", "March 5 17:00"). Returns `None` when no
/// supported form matches.
pub fn parse_instant(text: &str, today: NaiveDate) -> Option<NaiveDateTime> {
    let text = text.trim();

    for format in DATETIME_FORMATS.iter().chain(DATE_FORMATS) {
        if let Some(instant) = try_format(text, format) {
            return Some(instant);
        }
    }

    // month-name dates without a year: assume the reference year
    let with_year = format!("{} {}", today.year(), text);
    for format in YEARLESS_FORMATS {
        if let Some(instant) = try_format(&with_year, format) {
            return Some(instant);
        }
    }

    None
}

/// Try one strftime format, defaulting omitted clock fields to zero.
fn try_format(text: &str, format: &str) -> Option<NaiveDateTime> {
    let mut parsed = Parsed::new();
    parse(&mut parsed, text, StrftimeItems::new(format)).ok()?;

    // Fields the format already set reject conflicting defaults, which
    // is exactly the behavior wanted here.
    let _ = parsed.set_hour(0);
    let _ = parsed.set_minute(0);
    let _ = parsed.set_second(0);

    let date = parsed.to_naive_date().ok()?;
    let time = parsed.to_naive_time().ok()?;
    Some(date.and_time(time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn instant(text: &str) -> Option<NaiveDateTime> {
        parse_instant(text, today())
    }

    #[test]
    fn test_iso_date_with_24h_time() {
        assert_eq!(
            instant("2024-03-05 17:00"),
            Some(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(17, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_iso_date_with_meridiem_time() {
        assert_eq!(
            instant("2024-03-05 5 pm"),
            Some(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(17, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_iso_date_with_minutes_and_meridiem() {
        assert_eq!(
            instant("2024-03-05 5:30 pm"),
            Some(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(17, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_date_only_means_midnight() {
        assert_eq!(
            instant("2024-03-05"),
            Some(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_month_name_assumes_reference_year() {
        assert_eq!(
            instant("March 5 17:00"),
            Some(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(17, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_day_before_month_name() {
        assert_eq!(
            instant("5 March 5 pm"),
            Some(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(17, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_slash_date() {
        assert_eq!(
            instant("3/5/2024 09:15"),
            Some(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(9, 15, 0).unwrap())
        );
    }

    #[test]
    fn test_surrounding_whitespace_tolerated() {
        assert_eq!(instant("  2024-03-05 17:00  "), instant("2024-03-05 17:00"));
    }

    #[test]
    fn test_unparseable_text() {
        assert_eq!(instant("2024-03-05 blorp"), None);
        assert_eq!(instant("blorp"), None);
        assert_eq!(instant(""), None);
    }
}
