//! Assembly of extracted fragments into a submittable event.

use chrono::{Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use thiserror::Error;

use crate::domain::{EventMention, EventSpec};

use super::instant::parse_instant;
use super::normalize::to_24h;
use super::relative::{resolve_date, strip_relative_time};

/// Every event gets the same fixed duration
const EVENT_DURATION_HOURS: i64 = 1;

/// Reasons the extraction pipeline declines to produce an event
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// No usable name or time was extracted; the pipeline does not guess
    #[error("missing event fields: no {missing} extracted from transcript")]
    MissingFields { missing: &'static str },

    /// The combined date/time string matched no supported instant form
    #[error("unparseable date/time: {combined:?}")]
    UnparseableTime { combined: String },

    /// The instant does not exist in the target zone (DST gap)
    #[error("cannot localize {naive} in {timezone}")]
    TimezoneError { naive: NaiveDateTime, timezone: Tz },
}

/// Combine name + date phrase + time phrase into a timezone-aware event.
///
/// The step order is significant: the relative-time override runs after
/// the 24-hour conversion attempt, so a "tomorrow" embedded in the time
/// phrase survives the conversion (the AM/PM pattern cannot match it)
/// and still forces the date. A missing date never fails here — the
/// extractor already defaulted it.
pub fn assemble(
    mention: &EventMention,
    today: NaiveDate,
    timezone: Tz,
) -> Result<EventSpec, ExtractionError> {
    let name = mention.name.as_deref().filter(|n| !n.is_empty());
    let missing = match (name, mention.time_phrase.as_deref()) {
        (Some(_), Some(_)) => None,
        (None, Some(_)) => Some("name"),
        (Some(_), None) => Some("time"),
        (None, None) => Some("name or time"),
    };
    if let Some(missing) = missing {
        return Err(ExtractionError::MissingFields { missing });
    }
    let name = name.unwrap_or_default().to_string();
    let time_phrase = mention.time_phrase.as_deref().unwrap_or_default();

    let date_phrase = resolve_date(&mention.date_phrase, today);
    let normalized = to_24h(time_phrase);
    let (time_phrase, date_phrase) =
        strip_relative_time(Some(&normalized), &date_phrase, today);

    let combined = format!("{} {}", date_phrase, time_phrase.unwrap_or_default())
        .trim()
        .to_string();
    let naive = parse_instant(&combined, today)
        .ok_or(ExtractionError::UnparseableTime { combined })?;

    let start = match timezone.from_local_datetime(&naive) {
        LocalResult::Single(start) => start,
        // a clock rolled back repeats the hour; take the earlier instant
        LocalResult::Ambiguous(earlier, _) => earlier,
        LocalResult::None => return Err(ExtractionError::TimezoneError { naive, timezone }),
    };
    let end = start + Duration::hours(EVENT_DURATION_HOURS);

    Ok(EventSpec {
        name,
        start,
        end,
        timezone,
    })
}
