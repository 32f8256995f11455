//! CLI argument definitions and parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::backend::{DEFAULT_HOST, DEFAULT_LANGUAGE, DEFAULT_REFERENCE_VOICE};
use crate::media::DEFAULT_UPLOADS_DIR;

/// Photo narration CLI.
#[derive(Parser, Debug)]
#[command(name = "phototale-rs")]
#[command(about = "Turn photos into narrated stories using open-source models")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Backend host address
    #[arg(long, default_value = DEFAULT_HOST, global = true)]
    pub host: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Story library directory (defaults to ~/.phototale-rs/stories)
    #[arg(long, global = true)]
    pub library: Option<PathBuf>,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Caption an image, expand the caption into a story and narrate it
    Narrate {
        /// Image to narrate
        image: PathBuf,

        /// Title for the saved story
        #[arg(short, long)]
        title: Option<String>,

        /// Narrate the raw caption instead of expanding it into a story
        #[arg(long)]
        no_expand: bool,

        #[command(flatten)]
        speech: SpeechArgs,
    },

    /// Caption an image
    Caption {
        /// Image to caption
        image: PathBuf,
    },

    /// Synthesize voice-cloned speech for a text
    Speak {
        /// Text to speak
        text: String,

        #[command(flatten)]
        speech: SpeechArgs,
    },

    /// Manage the story library
    Stories {
        #[command(subcommand)]
        command: StoriesCommand,
    },

    /// Check model server availability
    Health,
}

/// Synthesis options shared by `narrate` and `speak`.
#[derive(Args, Debug)]
pub struct SpeechArgs {
    /// Reference voice sample to clone
    #[arg(long, default_value = DEFAULT_REFERENCE_VOICE)]
    pub voice_ref: PathBuf,

    /// Synthesis language
    #[arg(short, long, default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// Directory generated audio and image copies are written to
    #[arg(short, long, default_value = DEFAULT_UPLOADS_DIR)]
    pub output_dir: PathBuf,
}

/// Story library commands.
#[derive(Subcommand, Debug)]
pub enum StoriesCommand {
    /// List saved stories, newest first
    List,

    /// Print a saved story
    Show {
        /// Story id
        id: String,
    },

    /// Delete a saved story record
    Delete {
        /// Story id
        id: String,
    },
}
