//! Output locations for generated artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use super::MediaError;

/// Directory generated artifacts land in by default.
pub const DEFAULT_UPLOADS_DIR: &str = "uploads";

/// Write synthesized WAV bytes to a fresh path under `dir`.
///
/// Files are named `audio_<8 hex digits>.wav` with the suffix drawn
/// from 4 random bytes, so two invocations collide only by chance.
/// The directory is created if missing; nothing ever cleans the files
/// up again.
pub fn write_audio(dir: &Path, bytes: &[u8]) -> Result<PathBuf, MediaError> {
    fs::create_dir_all(dir)?;

    let path = dir.join(format!("audio_{:08x}.wav", rand::random::<u32>()));
    fs::write(&path, bytes)?;

    Ok(path)
}

/// Copy a source image into `dir` under a millisecond-timestamp name,
/// keeping the original extension.
pub fn stage_image(source: &Path, dir: &Path) -> Result<PathBuf, MediaError> {
    fs::create_dir_all(dir)?;

    let ext = source
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    let dest = dir.join(format!("{}{ext}", Utc::now().timestamp_millis()));

    fs::copy(source, &dest)?;

    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use tempfile::TempDir;

    #[test]
    fn test_write_audio_names_match_pattern() {
        let dir = TempDir::new().unwrap();
        let path = write_audio(dir.path(), b"RIFF fake wav").unwrap();

        let name = path.file_name().unwrap().to_str().unwrap();
        let pattern = Regex::new(r"^audio_[0-9a-f]{8}\.wav$").unwrap();
        assert!(pattern.is_match(name), "unexpected name: {name}");
        assert_eq!(fs::read(&path).unwrap(), b"RIFF fake wav");
    }

    #[test]
    fn test_write_audio_consecutive_paths_differ() {
        let dir = TempDir::new().unwrap();
        let first = write_audio(dir.path(), b"one").unwrap();
        let second = write_audio(dir.path(), b"two").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_write_audio_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("uploads");
        let path = write_audio(&nested, b"bytes").unwrap();

        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }

    #[test]
    fn test_stage_image_keeps_extension() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("photo.png");
        fs::write(&source, b"png bytes").unwrap();

        let staged = stage_image(&source, &dir.path().join("uploads")).unwrap();

        assert_eq!(staged.extension().unwrap(), "png");
        let stem = staged.file_stem().unwrap().to_str().unwrap();
        assert!(stem.chars().all(|c| c.is_ascii_digit()), "stem: {stem}");
        assert_eq!(fs::read(&staged).unwrap(), b"png bytes");
    }

    #[test]
    fn test_stage_image_missing_source() {
        let dir = TempDir::new().unwrap();
        let result = stage_image(&dir.path().join("gone.png"), dir.path());

        assert!(matches!(result.unwrap_err(), MediaError::Io(_)));
    }
}
