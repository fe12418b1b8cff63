//! voxcal - voice-driven calendar event creator
//!
//! Records a short audio clip, transcribes it with Whisper, extracts an
//! event name/date/time from the transcript, normalizes the date/time
//! into a timezone-aware instant, and creates the event on Google
//! Calendar.
//!
//! # Architecture
//!
//! One recording triggers one strictly sequential run:
//!
//! ```text
//! microphone → whisper → extract → resolve/normalize → assemble → calendar
//! ```
//!
//! The interesting logic lives in `extract`: turning fragments like
//! "at 5 pm tomorrow" into a fully qualified start/end instant. Audio
//! capture, transcription, and the calendar API are thin adapters behind
//! traits so tests can swap them out.
//!
//! # Modules
//!
//! - `adapters`: External system integrations (Whisper, Google Calendar)
//! - `audio`: Microphone capture and WAV encoding
//! - `extract`: Entity extraction and date/time normalization
//! - `pipeline`: Sequential run wiring the collaborators together
//! - `domain`: Data structures (EventMention, EventSpec, CreatedEvent)
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Record 10 seconds and schedule the spoken event
//! voxcal capture
//!
//! # Preview extraction on text
//! echo "Team sync at 5 pm tomorrow" | voxcal extract
//! ```

pub mod adapters;
pub mod audio;
pub mod cli;
pub mod config;
pub mod domain;
pub mod extract;
pub mod pipeline;

// Re-export main types at crate root for convenience
pub use adapters::{CalendarApi, Transcriber, Transcript};
pub use domain::{CreatedEvent, EventMention, EventSpec};
pub use extract::{EntityRecognizer, ExtractionError, RuleBasedRecognizer};
pub use pipeline::{EventPipeline, PipelineError, PipelineReport, SubmittedEvent};
