//! Story persistence: the record schema and the local library.
//!
//! Generated stories are kept as one JSON file per record under the
//! library directory, keyed by UUID.

mod library;
mod record;

pub use library::{LibraryError, StoryLibrary};
pub use record::{StoryRecord, DEFAULT_TITLE};
