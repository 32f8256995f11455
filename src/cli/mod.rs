//! CLI argument parsing and validation.

mod args;
mod script;

pub use args::{Cli, Command, SpeechArgs, StoriesCommand};
pub use script::{ScriptArgs, UsageError};
