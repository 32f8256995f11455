//! phototale-rs CLI entry point.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use phototale_rs::backend::{
    speech_backend, text_backend, vision_backend, BackendError, HealthResponse, Model,
    SpeechBackend, TextBackend, VisionBackend,
};
use phototale_rs::cli::{Cli, Command, SpeechArgs, StoriesCommand};
use phototale_rs::engine::{NarrateOptions, SpeakOptions, StoryEngine};
use phototale_rs::story::StoryLibrary;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let library = match cli.library.clone() {
        Some(dir) => StoryLibrary::with_dir(dir),
        None => StoryLibrary::new(),
    };

    let engine = StoryEngine::new(
        speech_backend(&cli.host),
        vision_backend(&cli.host),
        text_backend(&cli.host),
        library.clone(),
    );

    match cli.command {
        Command::Narrate {
            image,
            title,
            no_expand,
            speech,
        } => run_narrate(&engine, &image, title, no_expand, &speech),
        Command::Caption { image } => run_caption(&engine, &image),
        Command::Speak { text, speech } => run_speak(&engine, &text, &speech),
        Command::Stories { command } => run_stories(&library, &command),
        Command::Health => run_health(&engine),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn speak_options(args: &SpeechArgs) -> SpeakOptions {
    SpeakOptions {
        reference_voice: args.voice_ref.clone(),
        language: args.language.clone(),
        output_dir: args.output_dir.clone(),
    }
}

fn run_narrate<S: SpeechBackend, V: VisionBackend, T: TextBackend>(
    engine: &StoryEngine<S, V, T>,
    image: &Path,
    title: Option<String>,
    no_expand: bool,
    speech: &SpeechArgs,
) -> Result<()> {
    println!("Narrating {}...", image.display());

    let options = NarrateOptions {
        title,
        expand: !no_expand,
        speak: speak_options(speech),
    };

    let record = engine
        .narrate(image, &options)
        .context("Failed to narrate image")?;

    println!("Story saved: {}", record.id);
    println!("  Title: {}", record.title);
    if let Some(audio) = &record.audio_path {
        println!("  Audio: {}", audio.display());
    }
    println!();
    println!("{}", record.story);

    Ok(())
}

fn run_caption<S: SpeechBackend, V: VisionBackend, T: TextBackend>(
    engine: &StoryEngine<S, V, T>,
    image: &Path,
) -> Result<()> {
    let caption = engine
        .caption(image)
        .context("Failed to caption image")?;

    println!("{caption}");
    Ok(())
}

fn run_speak<S: SpeechBackend, V: VisionBackend, T: TextBackend>(
    engine: &StoryEngine<S, V, T>,
    text: &str,
    args: &SpeechArgs,
) -> Result<()> {
    println!("Generating speech...");
    println!("  Language: {}", args.language);

    let spoken = engine
        .speak(text, &speak_options(args))
        .context("Failed to synthesize speech")?;

    println!("Audio saved to: {}", spoken.path.display());
    println!("  Duration: {:.2}s", spoken.info.duration_secs);
    println!("  Sample rate: {} Hz", spoken.info.sample_rate);

    Ok(())
}

fn run_stories(library: &StoryLibrary, command: &StoriesCommand) -> Result<()> {
    match command {
        StoriesCommand::List => list_stories(library),
        StoriesCommand::Show { id } => show_story(library, id),
        StoriesCommand::Delete { id } => delete_story(library, id),
    }
}

fn list_stories(library: &StoryLibrary) -> Result<()> {
    let stories = library.list().context("Failed to list stories")?;

    if stories.is_empty() {
        println!("No stories found.");
        return Ok(());
    }

    println!("Saved stories:");
    for story in stories {
        println!("  {}  {}", story.id, story.title);
        println!("    Created: {}", story.created_at.format("%Y-%m-%d %H:%M"));
    }

    Ok(())
}

fn show_story(library: &StoryLibrary, id: &str) -> Result<()> {
    let record = library
        .load(id)
        .with_context(|| format!("Story '{}' not found", id))?;

    println!("{} ({})", record.title, record.created_at.format("%Y-%m-%d %H:%M"));
    println!("  Image: {}", record.image_path.display());
    if let Some(audio) = &record.audio_path {
        println!("  Audio: {}", audio.display());
    }
    println!();
    println!("{}", record.story);

    Ok(())
}

fn delete_story(library: &StoryLibrary, id: &str) -> Result<()> {
    library
        .delete(id)
        .with_context(|| format!("Failed to delete story '{}'", id))?;

    println!("Story '{}' deleted.", id);
    Ok(())
}

fn run_health<S: SpeechBackend, V: VisionBackend, T: TextBackend>(
    engine: &StoryEngine<S, V, T>,
) -> Result<()> {
    let report = engine.health();

    print_health(Model::XttsV2.name(), &report.speech);
    print_health(Model::Kosmos2.name(), &report.vision);
    print_health(Model::TinyLlama.name(), &report.text);

    Ok(())
}

fn print_health(name: &str, result: &Result<HealthResponse, BackendError>) {
    match result {
        Ok(health) => {
            println!("{name}: {} on {}", health.status, health.device);
            if let Some(gpu) = &health.gpu {
                println!("  GPU: {gpu}");
            }
        }
        Err(err) => println!("{name}: unavailable ({err})"),
    }
}
