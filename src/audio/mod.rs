//! Fixed-duration microphone capture.
//!
//! Captures mono 16kHz 16-bit audio from the default input device and
//! encodes it as an in-memory WAV buffer for the transcription backend.
//! Capture is blocking by design (one recording per pipeline run); run
//! it on a blocking thread from async code.

pub mod recorder;
pub mod wav;

use std::time::Duration;

use anyhow::Result;

pub use recorder::record;
pub use wav::encode_wav;

/// Sample rate the transcription backend expects
pub const SAMPLE_RATE: u32 = 16_000;

/// Capture is mono
pub const CHANNELS: u16 = 1;

/// Record for the given duration and return a WAV-encoded buffer.
pub fn record_wav(duration: Duration) -> Result<Vec<u8>> {
    let samples = record(duration)?;
    encode_wav(&samples, SAMPLE_RATE)
}
