//! Backend communication with model servers.
//!
//! Provides traits and implementations for communicating with the
//! Docker-based model servers: XTTS-v2 (speech), Kosmos-2 (vision) and
//! TinyLlama (text).

mod client;
mod types;

pub use client::HttpBackend;
pub use types::{
    BackendError, CaptionRequest, CaptionResponse, GenerationRequest, GenerationResponse,
    HealthResponse, SynthesisRequest, DEFAULT_HOST, DEFAULT_LANGUAGE, DEFAULT_REFERENCE_VOICE,
};

/// Pretrained model behind a backend server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Model {
    /// XTTS-v2 multilingual voice cloning.
    #[default]
    XttsV2,

    /// Kosmos-2 vision-to-sequence captioning.
    Kosmos2,

    /// TinyLlama 1.1B chat, used for story expansion.
    TinyLlama,
}

impl Model {
    /// Returns the backend server port for this model.
    pub fn port(&self) -> u16 {
        match self {
            Model::XttsV2 => 9480,
            Model::Kosmos2 => 9484,
            Model::TinyLlama => 9488,
        }
    }

    /// Returns the human-readable name of the model.
    pub fn name(&self) -> &'static str {
        match self {
            Model::XttsV2 => "XTTS-v2",
            Model::Kosmos2 => "Kosmos-2",
            Model::TinyLlama => "TinyLlama-1.1B-Chat",
        }
    }

    /// Returns the upstream identifier of the pretrained weights.
    pub fn model_id(&self) -> &'static str {
        match self {
            Model::XttsV2 => "tts_models/multilingual/multi-dataset/xtts_v2",
            Model::Kosmos2 => "microsoft/kosmos-2",
            Model::TinyLlama => "TinyLlama/TinyLlama-1.1B-Chat-v1.0",
        }
    }
}

/// Trait for the speech synthesis server.
///
/// Abstracts the HTTP communication so tests can substitute a mock.
#[cfg_attr(test, mockall::automock)]
pub trait SpeechBackend: Send + Sync {
    /// Check backend health status.
    fn health(&self) -> Result<HealthResponse, BackendError>;

    /// Synthesize voice-cloned speech.
    ///
    /// # Returns
    /// Raw WAV audio data
    fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, BackendError>;
}

/// Trait for the image captioning server.
#[cfg_attr(test, mockall::automock)]
pub trait VisionBackend: Send + Sync {
    /// Check backend health status.
    fn health(&self) -> Result<HealthResponse, BackendError>;

    /// Caption an image using beam-search decoding.
    fn caption(&self, request: &CaptionRequest) -> Result<String, BackendError>;
}

/// Trait for the text generation server.
#[cfg_attr(test, mockall::automock)]
pub trait TextBackend: Send + Sync {
    /// Check backend health status.
    fn health(&self) -> Result<HealthResponse, BackendError>;

    /// Generate text for a prompt.
    fn generate(&self, request: &GenerationRequest) -> Result<String, BackendError>;
}

/// Create a client for the speech server.
pub fn speech_backend(host: &str) -> HttpBackend {
    HttpBackend::new(Model::XttsV2, host)
}

/// Create a client for the vision server.
pub fn vision_backend(host: &str) -> HttpBackend {
    HttpBackend::new(Model::Kosmos2, host)
}

/// Create a client for the text generation server.
pub fn text_backend(host: &str) -> HttpBackend {
    HttpBackend::new(Model::TinyLlama, host)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===========================================
    // Model-to-backend mapping tests
    // ===========================================

    #[test]
    fn test_speech_backend_port() {
        let backend = speech_backend("localhost");
        assert_eq!(backend.base_url(), "http://localhost:9480");
        assert_eq!(backend.model(), Model::XttsV2);
    }

    #[test]
    fn test_vision_backend_port() {
        let backend = vision_backend("localhost");
        assert_eq!(backend.base_url(), "http://localhost:9484");
    }

    #[test]
    fn test_text_backend_port() {
        let backend = text_backend("127.0.0.1");
        assert_eq!(backend.base_url(), "http://127.0.0.1:9488");
    }

    #[test]
    fn test_model_ids_are_upstream_identifiers() {
        assert_eq!(
            Model::XttsV2.model_id(),
            "tts_models/multilingual/multi-dataset/xtts_v2"
        );
        assert_eq!(Model::Kosmos2.model_id(), "microsoft/kosmos-2");
    }

    // ===========================================
    // Backend trait tests with mocks
    // ===========================================

    #[test]
    fn test_mock_speech_backend_health() {
        let mut mock = MockSpeechBackend::new();

        mock.expect_health().times(1).returning(|| {
            Ok(HealthResponse {
                status: "healthy".to_string(),
                model: "xtts_v2".to_string(),
                cuda_available: true,
                gpu: Some("NVIDIA RTX 4090".to_string()),
                device: "cuda:0".to_string(),
            })
        });

        let health = mock.health().unwrap();
        assert_eq!(health.status, "healthy");
        assert!(health.cuda_available);
    }

    #[test]
    fn test_mock_speech_backend_synthesize() {
        let mut mock = MockSpeechBackend::new();

        mock.expect_synthesize()
            .withf(|req| req.text == "Hello world" && req.language == "en")
            .times(1)
            .returning(|_| Ok(b"RIFF\x00\x00\x00\x00WAVEfmt ".to_vec()));

        let request = SynthesisRequest::new("Hello world");
        let audio = mock.synthesize(&request).unwrap();
        assert!(audio.starts_with(b"RIFF"));
    }

    #[test]
    fn test_mock_vision_backend_caption() {
        let mut mock = MockVisionBackend::new();

        mock.expect_caption()
            .withf(|req| req.num_beams == 5)
            .times(1)
            .returning(|_| Ok("a dog on a beach".to_string()));

        let request = CaptionRequest::new("photo.png");
        let caption = mock.caption(&request).unwrap();
        assert_eq!(caption, "a dog on a beach");
    }

    #[test]
    fn test_mock_text_backend_failure() {
        let mut mock = MockTextBackend::new();

        mock.expect_generate().times(1).returning(|_| {
            Err(BackendError::ConnectionFailed(
                "Connection refused".to_string(),
            ))
        });

        let result = mock.generate(&GenerationRequest::new("prompt"));
        assert!(matches!(
            result.unwrap_err(),
            BackendError::ConnectionFailed(_)
        ));
    }
}
