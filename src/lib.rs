//! phototale-rs: photo-to-narrated-story CLI.
//!
//! This crate turns a photo into a narrated story: an image caption from
//! Kosmos-2, a short story expanded from the caption by TinyLlama, and a
//! voice-cloned narration from XTTS-v2. The models run behind local
//! Docker servers; this crate is the client side.

pub mod backend;
pub mod cli;
pub mod engine;
pub mod media;
pub mod story;
