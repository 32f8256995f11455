//! Standalone script: synthesize a narration WAV for a text.
//!
//! Usage: `generate_audio <text> <api_key>`
//!
//! Writes a voice-cloned WAV under `uploads/` and prints its path on
//! stdout so a calling process can capture it. The api key is part of
//! the inherited interface; synthesis runs on the local XTTS-v2 server
//! and never uses it.

use std::env;
use std::process;

use phototale_rs::backend::{speech_backend, text_backend, vision_backend, DEFAULT_HOST};
use phototale_rs::cli::ScriptArgs;
use phototale_rs::engine::{EngineError, SpeakOptions, StoryEngine};
use phototale_rs::story::StoryLibrary;

fn main() {
    env_logger::init();

    let Ok(args) = ScriptArgs::parse_args(env::args_os()) else {
        eprintln!("Usage: generate_audio <text> <api_key>");
        process::exit(1);
    };

    log::debug!("api key accepted but unused; synthesis runs locally");

    match generate(&args.payload) {
        Ok(path) => println!("{path}"),
        Err(err) => {
            eprintln!("Error generating audio: {err}");
            process::exit(1);
        }
    }
}

fn generate(text: &str) -> Result<String, EngineError> {
    let engine = StoryEngine::new(
        speech_backend(DEFAULT_HOST),
        vision_backend(DEFAULT_HOST),
        text_backend(DEFAULT_HOST),
        StoryLibrary::new(),
    );

    let spoken = engine.speak(text, &SpeakOptions::default())?;
    Ok(spoken.path.display().to_string())
}
