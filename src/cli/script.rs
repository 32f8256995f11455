//! Argument handling for the standalone leaf scripts.
//!
//! `generate_audio` and `generate_story` keep the interface of the
//! scripts they replace: exactly two positional arguments, a usage line
//! on stderr and exit code 1 for anything else. Help and version flags
//! are disabled and hyphen-leading values pass through unchanged so the
//! payload is never mistaken for a flag.

use std::ffi::OsString;

use clap::Parser;
use thiserror::Error;

/// The two positionals every leaf script takes.
#[derive(Parser, Debug)]
#[command(disable_help_flag = true)]
#[command(disable_version_flag = true)]
pub struct ScriptArgs {
    /// Script payload: the text to speak or the image path.
    #[arg(allow_hyphen_values = true)]
    pub payload: String,

    /// API key; accepted for interface compatibility.
    #[arg(allow_hyphen_values = true)]
    pub api_key: String,
}

/// The script was not given exactly two arguments.
#[derive(Error, Debug)]
#[error("expected exactly two arguments")]
pub struct UsageError;

impl ScriptArgs {
    /// Parse a leaf script's argv, collapsing every parse failure into
    /// the single usage error the scripts report.
    pub fn parse_args<I, T>(argv: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(argv).map_err(|_| UsageError)
    }
}
