//! Sequential record-to-calendar pipeline.
//!
//! One audio capture triggers one run: transcribe, extract, resolve,
//! assemble, submit. No batching, no retries, no state carried between
//! runs — the remote calendar is the system of record.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use chrono_tz::Tz;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::adapters::{CalendarApi, Transcriber};
use crate::domain::{CreatedEvent, EventMention, EventSpec};
use crate::extract::{assemble, extract, EntityRecognizer, ExtractionError};

/// Recoverable failures of a single pipeline run.
///
/// Each is reported to the user with its underlying detail and ends the
/// run; re-recording is the only retry.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("calendar submission failed: {0}")]
    Submission(anyhow::Error),
}

/// A successfully created event with the spec that produced it
#[derive(Debug, Clone)]
pub struct SubmittedEvent {
    pub spec: EventSpec,
    pub created: CreatedEvent,
}

/// Everything the UI displays about one run.
///
/// The transcript and extracted fragments are always present, so
/// intermediate results stay visible even when the run fails.
#[derive(Debug)]
pub struct PipelineReport {
    pub transcript: String,
    pub mention: EventMention,
    pub outcome: Result<SubmittedEvent, PipelineError>,
}

/// Wires the long-lived collaborators into one sequential flow
pub struct EventPipeline {
    transcriber: Arc<dyn Transcriber>,
    recognizer: Arc<dyn EntityRecognizer>,
    calendar: Arc<dyn CalendarApi>,
    calendar_id: String,
    timezone: Tz,
}

impl EventPipeline {
    /// Create a pipeline over injected collaborators
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        recognizer: Arc<dyn EntityRecognizer>,
        calendar: Arc<dyn CalendarApi>,
        calendar_id: impl Into<String>,
        timezone: Tz,
    ) -> Self {
        Self {
            transcriber,
            recognizer,
            calendar,
            calendar_id: calendar_id.into(),
            timezone,
        }
    }

    /// Run the full pipeline on a WAV buffer.
    ///
    /// Transcription failure is not a recoverable pipeline outcome (the
    /// report would have nothing to show); it propagates as an error.
    #[instrument(skip(self, wav))]
    pub async fn run_audio(&self, wav: &[u8]) -> Result<PipelineReport> {
        let transcript = self
            .transcriber
            .transcribe(wav)
            .await
            .context("Transcription failed")?;
        info!(
            chars = transcript.text.len(),
            seconds = transcript.duration_seconds,
            "Transcription complete"
        );

        Ok(self.run_transcript(&transcript.text).await)
    }

    /// Extract, assemble, and submit a single transcript.
    pub async fn run_transcript(&self, transcript: &str) -> PipelineReport {
        let mention = extract(transcript, self.recognizer.as_ref());
        debug!(?mention, "Extracted event fragments");

        // the reference date is read fresh every run, never cached
        let today = Local::now().date_naive();

        let outcome = match assemble(&mention, today, self.timezone) {
            Ok(spec) => match self.calendar.insert_event(&self.calendar_id, &spec).await {
                Ok(created) => {
                    info!(event_id = %created.id, "Event created");
                    Ok(SubmittedEvent { spec, created })
                }
                Err(e) => Err(PipelineError::Submission(e)),
            },
            Err(e) => Err(PipelineError::Extraction(e)),
        };

        if let Err(e) = &outcome {
            warn!(error = %e, "Run did not create an event");
        }

        PipelineReport {
            transcript: transcript.to_string(),
            mention,
            outcome,
        }
    }
}
