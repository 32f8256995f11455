//! Standalone script: caption an image.
//!
//! Usage: `generate_story <image_path> <api_key>`
//!
//! Prints the Kosmos-2 caption for the image on stdout. The api key is
//! part of the inherited interface; captioning runs on the local server
//! and never uses it.

use std::env;
use std::path::Path;
use std::process;

use phototale_rs::backend::{speech_backend, text_backend, vision_backend, DEFAULT_HOST};
use phototale_rs::cli::ScriptArgs;
use phototale_rs::engine::{EngineError, StoryEngine};
use phototale_rs::story::StoryLibrary;

fn main() {
    env_logger::init();

    let Ok(args) = ScriptArgs::parse_args(env::args_os()) else {
        eprintln!("Usage: generate_story <image_path> <api_key>");
        process::exit(1);
    };

    log::debug!("api key accepted but unused; captioning runs locally");

    match caption(Path::new(&args.payload)) {
        Ok(story) => println!("{story}"),
        Err(err) => {
            eprintln!("Error generating story: {err}");
            process::exit(1);
        }
    }
}

fn caption(image: &Path) -> Result<String, EngineError> {
    let engine = StoryEngine::new(
        speech_backend(DEFAULT_HOST),
        vision_backend(DEFAULT_HOST),
        text_backend(DEFAULT_HOST),
        StoryLibrary::new(),
    );

    engine.caption(image)
}
