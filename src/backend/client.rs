//! HTTP client for backend communication.

use std::path::Path;

use super::types::{
    mime_for_upload, BackendError, CaptionRequest, CaptionResponse, ErrorBody, GenerationRequest,
    GenerationResponse, HealthResponse, SynthesisRequest,
};
use super::{Model, SpeechBackend, TextBackend, VisionBackend};

/// HTTP client for one model server.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::blocking::Client,
    model: Model,
}

impl HttpBackend {
    /// Create a new client for the server hosting `model`.
    pub fn new(model: Model, host: &str) -> Self {
        let port = model.port();
        let base_url = format!("http://{host}:{port}");

        Self {
            base_url,
            client: reqwest::blocking::Client::new(),
            model,
        }
    }

    /// Get the base URL for this backend.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the model this backend serves.
    pub fn model(&self) -> Model {
        self.model
    }

    fn fetch_health(&self) -> Result<HealthResponse, BackendError> {
        let url = format!("{}/health", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        let response = check_status(response)?;

        response
            .json()
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }

    /// Build a multipart file part from a local file.
    fn file_part(
        path: &Path,
        fallback_name: &str,
    ) -> Result<reqwest::blocking::multipart::Part, BackendError> {
        let data = std::fs::read(path)
            .map_err(|_| BackendError::FileNotFound(path.display().to_string()))?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(fallback_name)
            .to_string();

        reqwest::blocking::multipart::Part::bytes(data)
            .file_name(file_name)
            .mime_str(mime_for_upload(path))
            .map_err(|e| BackendError::RequestFailed(e.to_string()))
    }
}

impl SpeechBackend for HttpBackend {
    fn health(&self) -> Result<HealthResponse, BackendError> {
        self.fetch_health()
    }

    fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, BackendError> {
        let url = format!("{}/synthesize", self.base_url);

        let speaker = Self::file_part(&request.reference_voice, "reference.wav")?;
        let form = reqwest::blocking::multipart::Form::new()
            .text("text", request.text.clone())
            .text("language", request.language.clone())
            .part("speaker", speaker);

        log::debug!("POST {url} ({} chars)", request.text.len());

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        let response = check_status(response)?;

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}

impl VisionBackend for HttpBackend {
    fn health(&self) -> Result<HealthResponse, BackendError> {
        self.fetch_health()
    }

    fn caption(&self, request: &CaptionRequest) -> Result<String, BackendError> {
        let url = format!("{}/caption", self.base_url);

        let image = Self::file_part(&request.image, "image.png")?;
        let form = reqwest::blocking::multipart::Form::new()
            .part("image", image)
            .text("num_beams", request.num_beams.to_string())
            .text("max_length", request.max_length.to_string())
            .text(
                "no_repeat_ngram_size",
                request.no_repeat_ngram_size.to_string(),
            );

        log::debug!("POST {url} ({})", request.image.display());

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        let response = check_status(response)?;

        let parsed: CaptionResponse = response
            .json()
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        Ok(parsed.caption)
    }
}

impl TextBackend for HttpBackend {
    fn health(&self) -> Result<HealthResponse, BackendError> {
        self.fetch_health()
    }

    fn generate(&self, request: &GenerationRequest) -> Result<String, BackendError> {
        let url = format!("{}/generate", self.base_url);

        log::debug!("POST {url} ({} prompt chars)", request.prompt.len());

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        let response = check_status(response)?;

        let parsed: GenerationResponse = response
            .json()
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        Ok(parsed.text)
    }
}

/// Map a non-success status to an error, surfacing the server's own
/// message when the body carries one.
fn check_status(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(&body) {
        return Err(BackendError::ServerError(format!(
            "{status}: {}",
            parsed.error
        )));
    }

    Err(BackendError::RequestFailed(format!("Status: {status}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_includes_model_port() {
        let backend = HttpBackend::new(Model::Kosmos2, "localhost");
        assert_eq!(backend.base_url(), "http://localhost:9484");
    }

    #[test]
    fn test_file_part_missing_file() {
        let result = HttpBackend::file_part(Path::new("/nonexistent/sample.wav"), "reference.wav");
        assert!(matches!(result.unwrap_err(), BackendError::FileNotFound(_)));
    }
}
