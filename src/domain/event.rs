//! Event types flowing through the extraction pipeline.

use chrono::DateTime;
use chrono_tz::Tz;

/// Unvalidated event fragments extracted from a transcript.
///
/// Created once per transcript and consumed immediately by the assembler;
/// never persisted. Absent fields are represented explicitly so the caller
/// decides whether to proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMention {
    /// Event name (text before the first " at "), if non-empty
    pub name: Option<String>,

    /// Date phrase as spoken. Never absent: when no date entity is found
    /// this holds the literal token "tomorrow" as a deliberate fallback.
    pub date_phrase: String,

    /// Time phrase as spoken, if any time entity was found
    pub time_phrase: Option<String>,
}

/// A fully qualified calendar event, ready for submission.
///
/// `end` is always `start` plus the fixed one-hour duration, so
/// `start < end` holds for every spec this process produces.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSpec {
    /// Event summary shown on the calendar
    pub name: String,

    /// Timezone-aware start instant
    pub start: DateTime<Tz>,

    /// Timezone-aware end instant (start + 1 hour)
    pub end: DateTime<Tz>,

    /// The single zone all events from this process are created in
    pub timezone: Tz,
}

impl EventSpec {
    /// IANA identifier of the event's timezone (e.g., "Asia/Karachi")
    pub fn timezone_id(&self) -> &'static str {
        self.timezone.name()
    }
}

/// Confirmation returned by the calendar service for a created event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedEvent {
    /// Remote event id
    pub id: String,

    /// Browser link to the created event, when the service provides one
    pub html_link: Option<String>,
}
