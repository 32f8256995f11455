//! Backend request/response types.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default host the model servers are reached on.
pub const DEFAULT_HOST: &str = "localhost";

/// Language the speech server synthesizes in unless told otherwise.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Reference voice sample the leaf script conditions cloning on.
pub const DEFAULT_REFERENCE_VOICE: &str = "voices/reference.wav";

/// Errors that can occur when communicating with a model server.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Server error: {0}")]
    ServerError(String),
}

/// Health check response from a model server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub cuda_available: bool,
    pub gpu: Option<String>,
    pub device: String,
}

/// Request for voice-cloned speech synthesis.
///
/// Sent as a multipart form: `text` and `language` fields plus the
/// reference sample as a file part. The server answers with raw WAV
/// bytes.
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub text: String,
    pub language: String,
    pub reference_voice: PathBuf,
}

impl SynthesisRequest {
    /// Create a synthesis request with the default language and
    /// reference sample.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            reference_voice: PathBuf::from(DEFAULT_REFERENCE_VOICE),
        }
    }

    /// Set the synthesis language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the reference voice sample to clone.
    pub fn with_reference_voice(mut self, path: impl Into<PathBuf>) -> Self {
        self.reference_voice = path.into();
        self
    }
}

/// Request for image captioning.
///
/// Sent as a multipart form: the image as a file part plus the
/// beam-search fields. Decoding runs with beam width 5, a 200-token
/// cap, and a no-repeat-bigram constraint.
#[derive(Debug, Clone)]
pub struct CaptionRequest {
    pub image: PathBuf,
    pub num_beams: u32,
    pub max_length: u32,
    pub no_repeat_ngram_size: u32,
}

impl CaptionRequest {
    pub fn new(image: impl Into<PathBuf>) -> Self {
        Self {
            image: image.into(),
            num_beams: 5,
            max_length: 200,
            no_repeat_ngram_size: 2,
        }
    }
}

/// Response from the captioning endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionResponse {
    pub caption: String,
}

/// Request for free-text generation (story expansion).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub do_sample: bool,
    pub repetition_penalty: f32,
}

impl GenerationRequest {
    /// Create a generation request with the story-expansion sampling
    /// parameters.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_new_tokens: 300,
            temperature: 0.9,
            do_sample: true,
            repetition_penalty: 1.3,
        }
    }
}

/// Response from the text generation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub text: String,
}

/// Error payload some servers return alongside a non-success status.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(alias = "detail")]
    pub error: String,
}

/// Best-effort MIME type for an upload, judged by extension.
pub(crate) fn mime_for_upload(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "audio/wav",
    }
}
