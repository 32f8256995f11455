//! Local artifact handling: output paths, image validation and WAV
//! inspection.
//!
//! Everything the pipelines touch on disk before or after a backend
//! call goes through this module.

mod audio;
mod image;
mod paths;

pub use audio::{inspect_wav, inspect_wav_file, WavInfo};
pub use image::{validate_image, ValidatedImage, MAX_IMAGE_BYTES};
pub use paths::{stage_image, write_audio, DEFAULT_UPLOADS_DIR};

use thiserror::Error;

/// Errors that can occur while handling local media files.
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Image not found: {0}")]
    ImageNotFound(String),

    #[error("Unsupported image format: {0} (expected .png, .jpg or .jpeg)")]
    UnsupportedImageFormat(String),

    #[error("Image too large: {size} bytes (limit {limit})")]
    ImageTooLarge { size: u64, limit: u64 },

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Audio file not found: {0}")]
    AudioNotFound(String),

    #[error("Invalid audio: {0}")]
    InvalidAudio(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
