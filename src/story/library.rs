//! Local story storage.

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

use super::record::StoryRecord;

/// Errors that can occur during story storage operations.
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Story not found: {0}")]
    NotFound(String),

    #[error("Invalid story id: {0}")]
    InvalidId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Manages saved stories as one JSON file per record.
#[derive(Clone)]
pub struct StoryLibrary {
    stories_dir: PathBuf,
}

impl StoryLibrary {
    /// Create a library rooted at the default directory.
    pub fn new() -> Self {
        let stories_dir = dirs::home_dir()
            .expect("Could not find home directory")
            .join(".phototale-rs")
            .join("stories");

        Self { stories_dir }
    }

    /// Create a library rooted at a custom directory.
    pub fn with_dir(stories_dir: PathBuf) -> Self {
        Self { stories_dir }
    }

    /// Get the library directory path.
    pub fn stories_dir(&self) -> PathBuf {
        self.stories_dir.clone()
    }

    /// Canonicalize an id string; anything that is not a UUID is
    /// rejected before it can reach the filesystem.
    fn canonical_id(id: &str) -> Result<String, LibraryError> {
        Uuid::parse_str(id)
            .map(|u| u.to_string())
            .map_err(|_| LibraryError::InvalidId(id.to_string()))
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.stories_dir.join(format!("{id}.json"))
    }

    /// Save a story record.
    pub fn save(&self, record: &StoryRecord) -> Result<(), LibraryError> {
        std::fs::create_dir_all(&self.stories_dir)?;

        let path = self.record_path(&record.id.to_string());
        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(path, json)?;

        Ok(())
    }

    /// Load a story record by id.
    pub fn load(&self, id: &str) -> Result<StoryRecord, LibraryError> {
        let id = Self::canonical_id(id)?;
        let path = self.record_path(&id);

        if !path.exists() {
            return Err(LibraryError::NotFound(id));
        }

        let json = std::fs::read_to_string(path)?;
        let record = serde_json::from_str(&json)?;

        Ok(record)
    }

    /// Delete a story record. Artifacts the record points at are left
    /// in place.
    pub fn delete(&self, id: &str) -> Result<(), LibraryError> {
        let id = Self::canonical_id(id)?;
        let path = self.record_path(&id);

        if !path.exists() {
            return Err(LibraryError::NotFound(id));
        }

        std::fs::remove_file(path)?;

        Ok(())
    }

    /// List all saved stories, newest first.
    pub fn list(&self) -> Result<Vec<StoryRecord>, LibraryError> {
        if !self.stories_dir.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();

        for entry in std::fs::read_dir(&self.stories_dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().is_some_and(|ext| ext == "json") {
                let json = std::fs::read_to_string(&path)?;
                if let Ok(record) = serde_json::from_str::<StoryRecord>(&json) {
                    records.push(record);
                }
            }
        }

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(records)
    }
}

impl Default for StoryLibrary {
    fn default() -> Self {
        Self::new()
    }
}
