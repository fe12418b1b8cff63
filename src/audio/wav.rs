//! In-memory WAV encoding.

use std::io::Cursor;

use anyhow::{Context, Result};

use super::CHANNELS;

/// Encode mono 16-bit PCM samples as a WAV buffer.
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: CHANNELS,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer =
        hound::WavWriter::new(&mut cursor, spec).context("Failed to start WAV writer")?;
    for sample in samples {
        writer.write_sample(*sample).context("Failed to write WAV sample")?;
    }
    writer.finalize().context("Failed to finalize WAV buffer")?;

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SAMPLE_RATE;

    #[test]
    fn test_wav_header_and_size() {
        let samples: Vec<i16> = vec![0, 1000, -1000, i16::MAX, i16::MIN];
        let wav = encode_wav(&samples, SAMPLE_RATE).unwrap();

        // RIFF/WAVE header plus two bytes per sample
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(wav.len(), 44 + samples.len() * 2);
    }

    #[test]
    fn test_round_trip_preserves_samples() {
        let samples: Vec<i16> = (0..160).map(|i| (i * 100) as i16).collect();
        let wav = encode_wav(&samples, SAMPLE_RATE).unwrap();

        let mut reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.spec().sample_rate, SAMPLE_RATE);
        let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(decoded, samples);
    }
}
