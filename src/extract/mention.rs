//! Heuristic extraction of event fragments from a transcript.

use crate::domain::EventMention;

use super::entities::{EntityKind, EntityRecognizer};

/// Fallback date phrase used when no date entity is found
pub const DEFAULT_DATE_PHRASE: &str = "tomorrow";

/// Extract an event name and date/time phrases from a transcript.
///
/// The name is the text before the first literal " at " (the whole
/// transcript when absent — a known heuristic limitation, not a failure);
/// an empty name counts as missing. Date and time phrases come from the
/// recognizer's spans in scan order, so when several occur the last one
/// of each kind wins. A transcript with no date entity gets the literal
/// "tomorrow" fallback; missing name or time stay `None` and the caller
/// decides whether to proceed.
pub fn extract(transcript: &str, recognizer: &dyn EntityRecognizer) -> EventMention {
    let name = match transcript.split_once(" at ") {
        Some((before, _)) => before,
        None => transcript,
    };
    let name = (!name.is_empty()).then(|| name.to_string());

    let mut date_phrase = None;
    let mut time_phrase = None;
    for span in recognizer.recognize(transcript) {
        match span.kind {
            EntityKind::Date => date_phrase = Some(span.text),
            EntityKind::Time => time_phrase = Some(span.text),
        }
    }

    EventMention {
        name,
        date_phrase: date_phrase.unwrap_or_else(|| DEFAULT_DATE_PHRASE.to_string()),
        time_phrase,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::entities::{EntitySpan, RuleBasedRecognizer};

    /// Recognizer that replays a fixed span sequence
    struct FixedRecognizer(Vec<EntitySpan>);

    impl EntityRecognizer for FixedRecognizer {
        fn recognize(&self, _text: &str) -> Vec<EntitySpan> {
            self.0.clone()
        }
    }

    #[test]
    fn test_name_before_first_at() {
        let mention = extract("Team sync at 5 pm tomorrow", &RuleBasedRecognizer::new());
        assert_eq!(mention.name.as_deref(), Some("Team sync"));
    }

    #[test]
    fn test_name_is_whole_transcript_without_at() {
        let mention = extract("Team sync 5 pm", &RuleBasedRecognizer::new());
        assert_eq!(mention.name.as_deref(), Some("Team sync 5 pm"));
    }

    #[test]
    fn test_empty_transcript_has_no_name() {
        let mention = extract("", &RuleBasedRecognizer::new());
        assert_eq!(mention.name, None);
        assert_eq!(mention.time_phrase, None);
        assert_eq!(mention.date_phrase, "tomorrow");
    }

    #[test]
    fn test_missing_date_defaults_to_tomorrow() {
        let mention = extract("Standup at 9 am", &RuleBasedRecognizer::new());
        assert_eq!(mention.date_phrase, "tomorrow");
        assert_eq!(mention.time_phrase.as_deref(), Some("9 am"));
    }

    #[test]
    fn test_later_entities_win() {
        let recognizer = FixedRecognizer(vec![
            EntitySpan { kind: EntityKind::Time, text: "9 am".into() },
            EntitySpan { kind: EntityKind::Date, text: "2024-03-05".into() },
            EntitySpan { kind: EntityKind::Time, text: "5 pm".into() },
            EntitySpan { kind: EntityKind::Date, text: "2024-03-06".into() },
        ]);
        let mention = extract("irrelevant", &recognizer);
        assert_eq!(mention.time_phrase.as_deref(), Some("5 pm"));
        assert_eq!(mention.date_phrase, "2024-03-06");
    }

    #[test]
    fn test_explicit_date_kept() {
        let mention = extract("Review at 17:00 on 2024-03-05", &RuleBasedRecognizer::new());
        assert_eq!(mention.name.as_deref(), Some("Review"));
        assert_eq!(mention.date_phrase, "2024-03-05");
        assert_eq!(mention.time_phrase.as_deref(), Some("17:00"));
    }
}
