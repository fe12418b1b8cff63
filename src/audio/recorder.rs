//! Microphone capture via the default input device.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleFormat;
use tracing::{debug, info};

use super::SAMPLE_RATE;

/// Record from the default input device for a fixed duration.
///
/// The device's native format and rate are used for capture; frames are
/// mixed to mono and resampled to 16kHz afterwards. The stream is
/// dropped when this function returns, releasing the device.
pub fn record(duration: Duration) -> Result<Vec<i16>> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .context("No input device available")?;
    let config = device
        .default_input_config()
        .context("No default input config for device")?;

    let source_rate = config.sample_rate().0;
    let source_channels = config.channels() as usize;
    debug!(
        rate = source_rate,
        channels = source_channels,
        format = ?config.sample_format(),
        "Opening input stream"
    );

    let samples: Arc<Mutex<Vec<f32>>> = Arc::new(Mutex::new(Vec::new()));
    let sample_format = config.sample_format();
    let stream_config: cpal::StreamConfig = config.into();

    let stream = match sample_format {
        SampleFormat::F32 => {
            let buffer = samples.clone();
            device.build_input_stream(
                &stream_config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    mix_to_mono(&buffer, data, source_channels);
                },
                log_stream_error,
                None,
            )
        }
        SampleFormat::I16 => {
            let buffer = samples.clone();
            device.build_input_stream(
                &stream_config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    let frames: Vec<f32> = data.iter().map(|s| *s as f32 / 32768.0).collect();
                    mix_to_mono(&buffer, &frames, source_channels);
                },
                log_stream_error,
                None,
            )
        }
        SampleFormat::U16 => {
            let buffer = samples.clone();
            device.build_input_stream(
                &stream_config,
                move |data: &[u16], _: &cpal::InputCallbackInfo| {
                    let frames: Vec<f32> =
                        data.iter().map(|s| (*s as f32 - 32768.0) / 32768.0).collect();
                    mix_to_mono(&buffer, &frames, source_channels);
                },
                log_stream_error,
                None,
            )
        }
        other => anyhow::bail!("Unsupported input sample format: {other:?}"),
    }
    .context("Failed to open input stream")?;

    stream.play().context("Failed to start input stream")?;
    info!(seconds = duration.as_secs(), "Recording");
    thread::sleep(duration);
    drop(stream);

    let captured = samples.lock().unwrap().clone();
    info!(frames = captured.len(), "Recording stopped");

    let mono_16k = if source_rate == SAMPLE_RATE {
        captured
    } else {
        resample_linear(&captured, source_rate, SAMPLE_RATE)
    };

    Ok(mono_16k
        .iter()
        .map(|s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
        .collect())
}

fn log_stream_error(err: cpal::StreamError) {
    tracing::error!(error = %err, "Input stream error");
}

/// Average interleaved channels down to mono and append to the buffer.
fn mix_to_mono(buffer: &Arc<Mutex<Vec<f32>>>, frames: &[f32], channels: usize) {
    let mut buffer = buffer.lock().unwrap();
    if channels <= 1 {
        buffer.extend_from_slice(frames);
    } else {
        buffer.extend(
            frames
                .chunks_exact(channels)
                .map(|frame| frame.iter().sum::<f32>() / channels as f32),
        );
    }
}

/// Linear-interpolation resampling; adequate for speech input.
fn resample_linear(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if samples.is_empty() || from_rate == to_rate {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let out_len = (samples.len() as f64 / ratio) as usize;
    let mut out = Vec::with_capacity(out_len);

    for i in 0..out_len {
        let position = i as f64 * ratio;
        let index = position as usize;
        let fraction = (position - index as f64) as f32;
        let current = samples[index.min(samples.len() - 1)];
        let next = samples[(index + 1).min(samples.len() - 1)];
        out.push(current + (next - current) * fraction);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_to_mono_averages_channels() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        mix_to_mono(&buffer, &[0.2, 0.4, -1.0, 1.0], 2);
        let mixed = buffer.lock().unwrap().clone();
        assert_eq!(mixed.len(), 2);
        assert!((mixed[0] - 0.3).abs() < 1e-6);
        assert!(mixed[1].abs() < 1e-6);
    }

    #[test]
    fn test_mix_to_mono_passes_mono_through() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        mix_to_mono(&buffer, &[0.1, 0.2, 0.3], 1);
        assert_eq!(buffer.lock().unwrap().clone(), vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_resample_halves_sample_count() {
        let samples: Vec<f32> = (0..32_000).map(|i| (i % 100) as f32 / 100.0).collect();
        let out = resample_linear(&samples, 32_000, 16_000);
        assert_eq!(out.len(), 16_000);
    }

    #[test]
    fn test_resample_same_rate_is_identity() {
        let samples = vec![0.1, -0.2, 0.3];
        assert_eq!(resample_linear(&samples, 16_000, 16_000), samples);
    }

    #[test]
    fn test_resample_empty_input() {
        assert!(resample_linear(&[], 48_000, 16_000).is_empty());
    }
}
