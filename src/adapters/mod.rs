//! Adapter interfaces for external systems.
//!
//! Adapters provide a unified interface for the two external
//! collaborators the pipeline blocks on: the speech-to-text backend and
//! the remote calendar service.

pub mod google_calendar;
pub mod whisper;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{CreatedEvent, EventSpec};

// Re-export the shipped implementations
pub use google_calendar::GoogleCalendarClient;
pub use whisper::WhisperTranscriber;

/// Output of a transcription call
#[derive(Debug, Clone)]
pub struct Transcript {
    /// Segment texts joined with single spaces
    pub text: String,

    /// Detected language code
    pub language: String,

    /// Audio duration covered by the segments
    pub duration_seconds: f64,
}

/// Trait for speech-to-text backends
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe a WAV-encoded mono 16kHz 16-bit PCM buffer
    async fn transcribe(&self, wav: &[u8]) -> Result<Transcript>;
}

/// Trait for calendar services
#[async_trait]
pub trait CalendarApi: Send + Sync {
    /// Create an event on the given calendar, returning the confirmation
    async fn insert_event(&self, calendar_id: &str, event: &EventSpec) -> Result<CreatedEvent>;
}
