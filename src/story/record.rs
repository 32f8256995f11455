//! Story record schema.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title used when the caller does not provide one.
pub const DEFAULT_TITLE: &str = "Untitled Story";

/// A generated story together with its artifacts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoryRecord {
    pub id: Uuid,
    pub title: String,
    pub image_path: PathBuf,
    pub story: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_path: Option<PathBuf>,
    pub created_at: DateTime<Utc>,
}

impl StoryRecord {
    /// Create a record with a fresh id and the current timestamp.
    pub fn new(
        title: Option<String>,
        image_path: PathBuf,
        story: String,
        audio_path: Option<PathBuf>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            image_path,
            story,
            audio_path,
            created_at: Utc::now(),
        }
    }
}
