//! Command-line interface for voxcal.
//!
//! Provides commands for capturing and scheduling a voice event,
//! running the pipeline on an existing recording, previewing extraction
//! on plain text, and inspecting configuration.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};

use crate::adapters::{GoogleCalendarClient, Transcriber, WhisperTranscriber};
use crate::audio;
use crate::config::{self, ResolvedConfig};
use crate::domain::EventMention;
use crate::extract::{self, RuleBasedRecognizer};
use crate::pipeline::{EventPipeline, PipelineReport};

/// voxcal - voice-driven calendar event creator
#[derive(Parser, Debug)]
#[command(name = "voxcal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record from the microphone and schedule the spoken event
    Capture {
        /// Recording length in seconds (defaults to configuration)
        #[arg(short, long)]
        seconds: Option<u64>,

        /// Extract and preview without submitting to the calendar
        #[arg(long)]
        dry_run: bool,
    },

    /// Run the pipeline on an existing WAV recording
    Transcribe {
        /// Path to a WAV file (mono 16kHz PCM)
        file: PathBuf,

        /// Extract and preview without submitting to the calendar
        #[arg(long)]
        dry_run: bool,
    },

    /// Preview extraction on plain text (no audio, no submission)
    Extract {
        /// Transcript text (reads from stdin if not provided)
        text: Option<String>,

        /// Read the transcript from stdin
        #[arg(long)]
        stdin: bool,
    },

    /// Show resolved configuration
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Capture { seconds, dry_run } => capture(seconds, dry_run).await,
            Commands::Transcribe { file, dry_run } => transcribe_file(&file, dry_run).await,
            Commands::Extract { text, stdin } => extract_text(text, stdin).await,
            Commands::Config => show_config().await,
        }
    }
}

/// Record from the microphone, then run the pipeline
async fn capture(seconds: Option<u64>, dry_run: bool) -> Result<()> {
    let cfg = config::config()?;

    // authenticate before touching the microphone; a bad credentials
    // file must abort the run, not waste a recording
    let calendar = if dry_run {
        None
    } else {
        Some(connect_calendar(cfg).await?)
    };

    let secs = seconds.unwrap_or(cfg.capture_seconds);
    println!("🔴 Recording for {} seconds...", secs);
    let wav =
        tokio::task::spawn_blocking(move || audio::record_wav(Duration::from_secs(secs)))
            .await
            .context("Recording task panicked")??;
    println!("🛑 Recording stopped.");

    run_on_wav(wav, calendar, cfg).await
}

/// Run the pipeline on an existing WAV file
async fn transcribe_file(file: &Path, dry_run: bool) -> Result<()> {
    let cfg = config::config()?;

    let calendar = if dry_run {
        None
    } else {
        Some(connect_calendar(cfg).await?)
    };

    let wav = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read audio file: {}", file.display()))?;

    run_on_wav(wav, calendar, cfg).await
}

/// Preview extraction on plain text
async fn extract_text(text: Option<String>, use_stdin: bool) -> Result<()> {
    let cfg = config::config()?;

    let transcript = if use_stdin || text.is_none() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer.trim().to_string()
    } else {
        text.unwrap_or_default()
    };

    preview(&transcript, cfg);
    Ok(())
}

/// Authenticate against the calendar service (startup-fatal on failure)
async fn connect_calendar(cfg: &ResolvedConfig) -> Result<Arc<GoogleCalendarClient>> {
    let client = GoogleCalendarClient::connect(&cfg.credentials_path)
        .await
        .context("Calendar authentication failed")?;
    Ok(Arc::new(client))
}

/// Transcribe a WAV buffer and either submit or preview the result
async fn run_on_wav(
    wav: Vec<u8>,
    calendar: Option<Arc<GoogleCalendarClient>>,
    cfg: &'static ResolvedConfig,
) -> Result<()> {
    let transcriber = Arc::new(WhisperTranscriber::new(cfg.whisper_model.clone()));

    match calendar {
        Some(calendar) => {
            let pipeline = EventPipeline::new(
                transcriber,
                Arc::new(RuleBasedRecognizer::new()),
                calendar,
                cfg.calendar_id.clone(),
                cfg.timezone,
            );
            let report = pipeline.run_audio(&wav).await?;
            print_report(&report);

            if report.outcome.is_err() {
                std::process::exit(1);
            }
            Ok(())
        }
        None => {
            let transcript = transcriber.transcribe(&wav).await?;
            preview(&transcript.text, cfg);
            Ok(())
        }
    }
}

/// Print transcript and extracted fields, the way the UI shows them
fn print_extraction(transcript: &str, mention: &EventMention) {
    println!();
    println!("Transcribed Text:");
    println!("  {}", transcript);
    println!();
    println!("Extracted Event Details:");
    println!("  Name: {}", mention.name.as_deref().unwrap_or("(none)"));
    println!("  Date: {}", mention.date_phrase);
    println!("  Time: {}", mention.time_phrase.as_deref().unwrap_or("(none)"));
    println!();
}

/// Print transcript, extracted fields, and the planned event (no submission)
fn preview(transcript: &str, cfg: &ResolvedConfig) {
    let recognizer = RuleBasedRecognizer::new();
    let mention = extract::extract(transcript, &recognizer);
    let today = Local::now().date_naive();

    print_extraction(transcript, &mention);
    println!("Planned Event:");
    match extract::assemble(&mention, today, cfg.timezone) {
        Ok(spec) => {
            println!("  {}", spec.name);
            println!(
                "  {} → {} ({})",
                spec.start.format("%Y-%m-%d %H:%M"),
                spec.end.format("%H:%M"),
                spec.timezone_id()
            );
        }
        Err(e) => println!("  ❌ {}", e),
    }
}

/// Print the full pipeline report
fn print_report(report: &PipelineReport) {
    print_extraction(&report.transcript, &report.mention);
    println!("Calendar Response:");
    match &report.outcome {
        Ok(submitted) => {
            match &submitted.created.html_link {
                Some(link) => println!("  ✅ Event created successfully: {}", link),
                None => println!(
                    "  ✅ Event created successfully (id: {})",
                    submitted.created.id
                ),
            }
            println!(
                "     {} → {} ({})",
                submitted.spec.start.format("%Y-%m-%d %H:%M"),
                submitted.spec.end.format("%H:%M"),
                submitted.spec.timezone_id()
            );
        }
        Err(e) => println!("  ❌ {}", e),
    }
}

/// Show the resolved configuration
async fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!();
    println!("voxcal Configuration");
    println!("══════════════════════════════════════════════════════════════");
    println!();
    println!(
        "Config file:      {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!("Calendar id:      {}", cfg.calendar_id);
    println!("Credentials:      {}", cfg.credentials_path.display());
    println!("Timezone:         {}", cfg.timezone.name());
    println!("Capture seconds:  {}", cfg.capture_seconds);
    println!("Whisper model:    {}", cfg.whisper_model);
    println!();

    if cfg.credentials_path.exists() {
        println!("✓ Credentials file exists");
    } else {
        println!("⚠️  Credentials file not found. Calendar submission will fail");
        println!("    Expected: {}", cfg.credentials_path.display());
    }

    Ok(())
}
