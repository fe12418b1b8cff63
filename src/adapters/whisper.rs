//! Whisper transcription backend.
//!
//! Shells out to a local whisper binary for transcription.

use std::process::Stdio;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use super::{Transcriber, Transcript};

/// Whisper output JSON structure
#[derive(Debug, Deserialize)]
struct WhisperOutput {
    #[serde(default)]
    language: String,
    #[serde(default)]
    segments: Vec<WhisperSegment>,
}

#[derive(Debug, Deserialize)]
struct WhisperSegment {
    #[serde(default)]
    text: String,
    #[serde(default)]
    end: f64,
}

/// Transcriber using a local Whisper CLI in subprocess mode
pub struct WhisperTranscriber {
    /// Path to the whisper binary
    binary_path: String,
    /// Model name passed to the CLI (e.g., "base")
    model: String,
}

impl WhisperTranscriber {
    /// Create a transcriber with the default binary path.
    ///
    /// Honors `WHISPER_PATH` first, then probes for whisper-ctranslate2
    /// (which supports voice-activity filtering), then plain whisper.
    pub fn new(model: impl Into<String>) -> Self {
        let binary_path = std::env::var("WHISPER_PATH").unwrap_or_else(|_| {
            if std::process::Command::new("whisper-ctranslate2")
                .arg("--help")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .is_ok()
            {
                "whisper-ctranslate2".to_string()
            } else {
                "whisper".to_string()
            }
        });

        Self {
            binary_path,
            model: model.into(),
        }
    }

    /// Create a transcriber with a custom binary path
    pub fn with_binary_path(binary_path: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            binary_path: binary_path.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, wav: &[u8]) -> Result<Transcript> {
        // The CLI wants files; stage the buffer in a temp dir that also
        // receives the JSON output
        let temp_dir = tempfile::tempdir().context("Failed to create temp dir")?;
        let audio_path = temp_dir.path().join("capture.wav");
        tokio::fs::write(&audio_path, wav)
            .await
            .context("Failed to stage audio for whisper")?;

        let mut command = Command::new(&self.binary_path);
        command
            .arg(&audio_path)
            .args(["--model", self.model.as_str()])
            .arg("--output_dir")
            .arg(temp_dir.path())
            .args(["--output_format", "json"])
            .args(["--language", "en"]);

        // silence is discarded before decoding where the backend allows it
        if self.binary_path.contains("ctranslate2") {
            command.args(["--vad_filter", "True"]);
        }

        let output = command
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .context("Failed to run whisper")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("Whisper failed: {}", stderr);
        }

        let json_path = temp_dir.path().join("capture.json");
        let json_content = tokio::fs::read_to_string(&json_path)
            .await
            .context("Failed to read whisper output")?;

        let whisper: WhisperOutput =
            serde_json::from_str(&json_content).context("Failed to parse whisper JSON")?;

        Ok(transcript_from_output(whisper))
    }
}

/// Join segment texts with single spaces and take the duration from the
/// last segment's end marker.
fn transcript_from_output(output: WhisperOutput) -> Transcript {
    let text = output
        .segments
        .iter()
        .map(|s| s.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let duration_seconds = output.segments.last().map(|s| s.end).unwrap_or(0.0);

    Transcript {
        text,
        language: if output.language.is_empty() {
            "en".to_string()
        } else {
            output.language
        },
        duration_seconds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_join_with_single_spaces() {
        let output: WhisperOutput = serde_json::from_str(
            r#"{
                "language": "en",
                "segments": [
                    {"text": " Team sync", "end": 1.4},
                    {"text": " at 5 pm tomorrow ", "end": 3.2}
                ]
            }"#,
        )
        .unwrap();

        let transcript = transcript_from_output(output);
        assert_eq!(transcript.text, "Team sync at 5 pm tomorrow");
        assert_eq!(transcript.duration_seconds, 3.2);
        assert_eq!(transcript.language, "en");
    }

    #[test]
    fn test_empty_segments_give_empty_transcript() {
        let output: WhisperOutput = serde_json::from_str(r#"{"segments": []}"#).unwrap();
        let transcript = transcript_from_output(output);
        assert_eq!(transcript.text, "");
        assert_eq!(transcript.duration_seconds, 0.0);
        assert_eq!(transcript.language, "en");
    }

    #[test]
    fn test_blank_segments_are_dropped() {
        let output: WhisperOutput = serde_json::from_str(
            r#"{"segments": [{"text": "  ", "end": 0.5}, {"text": "hello", "end": 1.0}]}"#,
        )
        .unwrap();
        assert_eq!(transcript_from_output(output).text, "hello");
    }
}
