//! Story engine: orchestration of captioning, story expansion and
//! voice-cloned narration.
//!
//! The engine is generic over the three backend traits so the
//! pipelines can be tested against mocks.

mod narrator;
mod prompt;

pub use narrator::{
    EngineError, HealthReport, NarrateOptions, SpeakOptions, SpokenAudio, StoryEngine,
};
