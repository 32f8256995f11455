//! WAV inspection for synthesized audio and reference samples.

use std::io::Cursor;
use std::path::Path;

use super::MediaError;

/// Basic facts about a WAV payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavInfo {
    pub sample_rate: u32,
    pub channels: u16,
    pub duration_secs: f32,
}

/// Inspect in-memory WAV bytes, as returned by the speech backend.
pub fn inspect_wav(bytes: &[u8]) -> Result<WavInfo, MediaError> {
    let reader = hound::WavReader::new(Cursor::new(bytes))
        .map_err(|e| MediaError::InvalidAudio(e.to_string()))?;

    Ok(info_from_reader(&reader))
}

/// Inspect a WAV file on disk, e.g. a reference voice sample.
pub fn inspect_wav_file(path: &Path) -> Result<WavInfo, MediaError> {
    if !path.exists() {
        return Err(MediaError::AudioNotFound(path.display().to_string()));
    }

    let reader =
        hound::WavReader::open(path).map_err(|e| MediaError::InvalidAudio(e.to_string()))?;

    Ok(info_from_reader(&reader))
}

fn info_from_reader<R: std::io::Read>(reader: &hound::WavReader<R>) -> WavInfo {
    let spec = reader.spec();
    // duration() counts samples per channel
    let frames = reader.duration();

    WavInfo {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        duration_secs: frames as f32 / spec.sample_rate as f32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{SampleFormat, WavSpec, WavWriter};
    use tempfile::TempDir;

    fn wav_bytes(sample_rate: u32, frames: usize) -> Vec<u8> {
        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
        for i in 0..frames {
            writer.write_sample((i % 128) as i16).unwrap();
        }
        writer.finalize().unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_inspect_wav_reports_duration() {
        let bytes = wav_bytes(24000, 12000);

        let info = inspect_wav(&bytes).unwrap();
        assert_eq!(info.sample_rate, 24000);
        assert_eq!(info.channels, 1);
        assert!((info.duration_secs - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_inspect_wav_rejects_garbage() {
        let result = inspect_wav(b"not a wav at all");
        assert!(matches!(result.unwrap_err(), MediaError::InvalidAudio(_)));
    }

    #[test]
    fn test_inspect_wav_file_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample.wav");
        std::fs::write(&path, wav_bytes(16000, 8000)).unwrap();

        let info = inspect_wav_file(&path).unwrap();
        assert_eq!(info.sample_rate, 16000);
        assert!((info.duration_secs - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_inspect_wav_file_missing() {
        let result = inspect_wav_file(Path::new("/nonexistent/sample.wav"));
        assert!(matches!(result.unwrap_err(), MediaError::AudioNotFound(_)));
    }
}
