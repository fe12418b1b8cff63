//! Named-entity recognition for date and time spans.
//!
//! The extractor only needs "given text, produce typed spans in document
//! order" — recognizer backends are swappable behind the trait without
//! changing the extraction contract.

use std::sync::OnceLock;

use regex::Regex;

/// Category of a recognized span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Calendar date ("tomorrow", "2024-03-05", "March 5")
    Date,

    /// Wall-clock time ("5 pm", "17:00", "5 pm tomorrow")
    Time,
}

/// A recognized entity span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpan {
    pub kind: EntityKind,
    pub text: String,
}

/// Trait for entity-recognition backends.
///
/// Implementations must return spans in document order, non-overlapping.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Vec<EntitySpan>;
}

/// Regex-based recognizer for common explicit and relative phrasings.
///
/// Time coverage: 12-hour clock with optional minutes and meridiem,
/// optionally trailed by a relative word ("5 pm tomorrow"); bare HH:MM.
/// Date coverage: relative words, ISO dates, slash dates, month-name
/// dates. Overlapping candidates resolve to the earliest start, longest
/// match — so "5 pm tomorrow" is a single Time span, not a Time plus an
/// inner Date.
#[derive(Debug, Default)]
pub struct RuleBasedRecognizer;

const TIME_PATTERNS: &[&str] = &[
    r"(?i)\b\d{1,2}(?::\d{2})?\s*(?:am|pm)(?:\s+(?:today|tomorrow|tonight))?\b",
    r"\b\d{1,2}:\d{2}\b",
];

const DATE_PATTERNS: &[&str] = &[
    r"(?i)\b(?:today|tomorrow|tonight|yesterday)\b",
    r"\b\d{4}-\d{2}-\d{2}\b",
    r"\b\d{1,2}/\d{1,2}/\d{2,4}\b",
    r"(?i)\b(?:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{1,2}\b",
    r"(?i)\b\d{1,2}\s+(?:january|february|march|april|may|june|july|august|september|october|november|december)\b",
];

fn patterns() -> &'static [(EntityKind, Regex)] {
    static PATTERNS: OnceLock<Vec<(EntityKind, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        TIME_PATTERNS
            .iter()
            .map(|p| (EntityKind::Time, p))
            .chain(DATE_PATTERNS.iter().map(|p| (EntityKind::Date, p)))
            .map(|(kind, pattern)| {
                // patterns are fixed at compile time; compilation cannot fail
                (kind, Regex::new(pattern).expect("static pattern"))
            })
            .collect()
    })
}

impl RuleBasedRecognizer {
    pub fn new() -> Self {
        Self
    }
}

impl EntityRecognizer for RuleBasedRecognizer {
    fn recognize(&self, text: &str) -> Vec<EntitySpan> {
        let mut candidates: Vec<(usize, usize, EntityKind)> = Vec::new();
        for (kind, regex) in patterns() {
            for m in regex.find_iter(text) {
                candidates.push((m.start(), m.end(), *kind));
            }
        }

        // Document order; at equal starts the longest candidate first
        candidates.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

        let mut spans = Vec::new();
        let mut last_end = 0;
        for (start, end, kind) in candidates {
            if start >= last_end {
                spans.push(EntitySpan {
                    kind,
                    text: text[start..end].to_string(),
                });
                last_end = end;
            }
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(text: &str) -> Vec<EntitySpan> {
        RuleBasedRecognizer::new().recognize(text)
    }

    #[test]
    fn test_time_with_relative_suffix_is_one_span() {
        let found = spans("Team sync at 5 pm tomorrow");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, EntityKind::Time);
        assert_eq!(found[0].text, "5 pm tomorrow");
    }

    #[test]
    fn test_separate_date_and_time_spans() {
        let found = spans("Dentist tomorrow at 9 am");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0], EntitySpan { kind: EntityKind::Date, text: "tomorrow".into() });
        assert_eq!(found[1], EntitySpan { kind: EntityKind::Time, text: "9 am".into() });
    }

    #[test]
    fn test_twenty_four_hour_clock() {
        let found = spans("Standup at 17:00");
        assert_eq!(found, vec![EntitySpan { kind: EntityKind::Time, text: "17:00".into() }]);
    }

    #[test]
    fn test_minutes_and_meridiem_beats_bare_clock() {
        // "5:30 pm" also matches the HH:MM pattern; the longer span wins
        let found = spans("Call at 5:30 pm");
        assert_eq!(found, vec![EntitySpan { kind: EntityKind::Time, text: "5:30 pm".into() }]);
    }

    #[test]
    fn test_iso_and_month_name_dates() {
        let found = spans("Review on 2024-03-05 then dinner March 7");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].text, "2024-03-05");
        assert_eq!(found[1].text, "March 7");
        assert!(found.iter().all(|s| s.kind == EntityKind::Date));
    }

    #[test]
    fn test_document_order_preserved() {
        let found = spans("lunch at 12 pm and review tomorrow at 17:00");
        let texts: Vec<&str> = found.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["12 pm", "tomorrow", "17:00"]);
    }

    #[test]
    fn test_no_entities() {
        assert!(spans("just a plain sentence").is_empty());
    }
}
