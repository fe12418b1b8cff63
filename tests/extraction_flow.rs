//! End-to-end extraction tests: transcript in, event spec out.
//!
//! These exercise the full extract → resolve → normalize → assemble
//! chain with a fixed reference date, no collaborators involved.

use chrono::{Duration, NaiveDate, Timelike};
use chrono_tz::Asia::Karachi;

use voxcal::extract::{assemble, extract, ExtractionError, RuleBasedRecognizer};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

fn run(transcript: &str) -> Result<voxcal::EventSpec, ExtractionError> {
    let recognizer = RuleBasedRecognizer::new();
    let mention = extract(transcript, &recognizer);
    assemble(&mention, today(), Karachi)
}

#[test]
fn relative_time_phrase_schedules_tomorrow() {
    let spec = run("Team sync at 5 pm tomorrow").unwrap();

    assert_eq!(spec.name, "Team sync");
    assert_eq!(
        spec.start.date_naive(),
        NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
    );
    assert_eq!(spec.start.hour(), 17);
    assert_eq!(spec.start.minute(), 0);
    assert_eq!(spec.end - spec.start, Duration::hours(1));
    assert_eq!(spec.timezone_id(), "Asia/Karachi");
}

#[test]
fn missing_date_defaults_to_tomorrow() {
    let spec = run("Standup at 9 am").unwrap();

    assert_eq!(spec.name, "Standup");
    assert_eq!(
        spec.start.date_naive(),
        NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
    );
    assert_eq!(spec.start.hour(), 9);
}

#[test]
fn explicit_date_and_24h_time_pass_through() {
    let spec = run("Project review at 17:00 on 2024-03-05").unwrap();

    assert_eq!(spec.name, "Project review");
    assert_eq!(
        spec.start.date_naive(),
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    );
    assert_eq!(spec.start.hour(), 17);
}

#[test]
fn separate_relative_date_entity_resolves() {
    let spec = run("Dentist tomorrow at 9 am").unwrap();

    // name heuristic keeps everything before the first " at "
    assert_eq!(spec.name, "Dentist tomorrow");
    assert_eq!(
        spec.start.date_naive(),
        NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
    );
    assert_eq!(spec.start.hour(), 9);
}

#[test]
fn meridiem_with_minutes() {
    let spec = run("Call with vendor at 5:30 pm").unwrap();
    assert_eq!(spec.start.hour(), 17);
    assert_eq!(spec.start.minute(), 30);
}

#[test]
fn no_time_entity_declines_to_proceed() {
    let err = run("Lunch at noon").unwrap_err();
    assert!(matches!(err, ExtractionError::MissingFields { .. }));
}

#[test]
fn empty_transcript_declines_to_proceed() {
    let err = run("").unwrap_err();
    assert!(matches!(err, ExtractionError::MissingFields { .. }));
}

#[test]
fn out_of_range_clock_is_unparseable() {
    // "99:99" looks like a clock to the recognizer but no instant form
    // accepts it; the failure carries the combined string
    let err = run("Meeting at 99:99").unwrap_err();
    match err {
        ExtractionError::UnparseableTime { combined } => {
            assert!(combined.contains("99:99"), "combined was {combined:?}");
        }
        other => panic!("expected UnparseableTime, got {other:?}"),
    }
}

#[test]
fn transcript_without_at_keeps_whole_text_as_name() {
    let spec = run("Weekly retro 4 pm").unwrap();
    assert_eq!(spec.name, "Weekly retro 4 pm");
    assert_eq!(spec.start.hour(), 16);
}
