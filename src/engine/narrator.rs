//! Story engine implementation.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::backend::{
    BackendError, CaptionRequest, GenerationRequest, HealthResponse, SpeechBackend,
    SynthesisRequest, TextBackend, VisionBackend, DEFAULT_LANGUAGE, DEFAULT_REFERENCE_VOICE,
};
use crate::media::{self, MediaError, WavInfo, DEFAULT_UPLOADS_DIR};
use crate::story::{LibraryError, StoryLibrary, StoryRecord};

use super::prompt;

/// Errors that can occur during engine operations.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Text must not be empty")]
    EmptyText,

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("Library error: {0}")]
    Library(#[from] LibraryError),
}

/// Options for voice-cloned synthesis.
#[derive(Debug, Clone)]
pub struct SpeakOptions {
    pub reference_voice: PathBuf,
    pub language: String,
    pub output_dir: PathBuf,
}

impl Default for SpeakOptions {
    fn default() -> Self {
        Self {
            reference_voice: PathBuf::from(DEFAULT_REFERENCE_VOICE),
            language: DEFAULT_LANGUAGE.to_string(),
            output_dir: PathBuf::from(DEFAULT_UPLOADS_DIR),
        }
    }
}

/// A synthesized narration on disk.
#[derive(Debug, Clone)]
pub struct SpokenAudio {
    pub path: PathBuf,
    pub info: WavInfo,
}

/// Options for the full narration pipeline.
#[derive(Debug, Clone)]
pub struct NarrateOptions {
    pub title: Option<String>,
    /// Expand the caption into a story with the text model; when off,
    /// the raw caption becomes the story text.
    pub expand: bool,
    pub speak: SpeakOptions,
}

impl Default for NarrateOptions {
    fn default() -> Self {
        Self {
            title: None,
            expand: true,
            speak: SpeakOptions::default(),
        }
    }
}

/// Availability of the three model servers.
#[derive(Debug)]
pub struct HealthReport {
    pub speech: Result<HealthResponse, BackendError>,
    pub vision: Result<HealthResponse, BackendError>,
    pub text: Result<HealthResponse, BackendError>,
}

/// The main engine that orchestrates backends and local storage.
pub struct StoryEngine<S: SpeechBackend, V: VisionBackend, T: TextBackend> {
    speech: S,
    vision: V,
    text: T,
    library: StoryLibrary,
}

impl<S: SpeechBackend, V: VisionBackend, T: TextBackend> StoryEngine<S, V, T> {
    /// Create a new engine.
    pub fn new(speech: S, vision: V, text: T, library: StoryLibrary) -> Self {
        Self {
            speech,
            vision,
            text,
            library,
        }
    }

    /// Synthesize voice-cloned speech for `text` and write the WAV
    /// under the output directory.
    ///
    /// The reference sample is checked before the backend is called, so
    /// a missing or broken sample fails with a local error rather than
    /// a server round trip.
    pub fn speak(&self, text: &str, options: &SpeakOptions) -> Result<SpokenAudio, EngineError> {
        if text.trim().is_empty() {
            return Err(EngineError::EmptyText);
        }

        media::inspect_wav_file(&options.reference_voice)?;

        let request = SynthesisRequest::new(text)
            .with_language(options.language.clone())
            .with_reference_voice(options.reference_voice.clone());

        let bytes = self.speech.synthesize(&request)?;
        let info = media::inspect_wav(&bytes)?;
        let path = media::write_audio(&options.output_dir, &bytes)?;

        log::debug!(
            "synthesized {:.2}s of audio to {}",
            info.duration_secs,
            path.display()
        );

        Ok(SpokenAudio { path, info })
    }

    /// Caption an image with the vision model.
    pub fn caption(&self, image: &Path) -> Result<String, EngineError> {
        media::validate_image(image)?;

        let caption = self.vision.caption(&CaptionRequest::new(image))?;
        log::debug!("caption: {caption}");

        Ok(caption)
    }

    /// Expand a caption into a story with the text model.
    pub fn expand_story(&self, caption: &str) -> Result<String, EngineError> {
        let prompt = prompt::story_prompt(caption);
        let raw = self.text.generate(&GenerationRequest::new(&prompt))?;
        let story = prompt::clean_generation(&raw, &prompt);

        if prompt::looks_like_parrot(&story, caption) {
            log::warn!("generated story stays close to the caption; returning it anyway");
        }

        Ok(story)
    }

    /// Full pipeline: caption the image, turn the caption into a story,
    /// narrate it, copy the image next to the audio, and save a record.
    ///
    /// Nothing is persisted to the library unless every step succeeds.
    pub fn narrate(
        &self,
        image: &Path,
        options: &NarrateOptions,
    ) -> Result<StoryRecord, EngineError> {
        let caption = self.caption(image)?;

        let story = if options.expand {
            self.expand_story(&caption)?
        } else {
            caption
        };

        let spoken = self.speak(&story, &options.speak)?;
        let image_copy = media::stage_image(image, &options.speak.output_dir)?;

        let record = StoryRecord::new(options.title.clone(), image_copy, story, Some(spoken.path));
        self.library.save(&record)?;

        Ok(record)
    }

    /// Probe all three model servers.
    pub fn health(&self) -> HealthReport {
        HealthReport {
            speech: self.speech.health(),
            vision: self.vision.health(),
            text: self.text.health(),
        }
    }
}
