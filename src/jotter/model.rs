use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Maximum length of a derived title, in characters.
pub const TITLE_MAX_CHARS: usize = 50;

/// Placeholder title for documents with no content.
pub const UNTITLED: &str = "Untitled";

/// One document known to the system.
///
/// `location` is the absolute path of the backing file. The title lives here
/// so the recent list can be rendered without reading content files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub location: PathBuf,
    pub saved_at: DateTime<Utc>,
}

impl Note {
    pub fn new(location: PathBuf, content: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: derive_title(content),
            location,
            saved_at: Utc::now(),
        }
    }
}

/// Derives a display title from document content: the first non-empty line,
/// trimmed and capped at [`TITLE_MAX_CHARS`] characters. Blank content gets
/// the [`UNTITLED`] placeholder.
pub fn derive_title(content: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.chars().take(TITLE_MAX_CHARS).collect())
        .unwrap_or_else(|| UNTITLED.to_string())
}
