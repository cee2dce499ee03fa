//! Core data types for the storage layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title given to notes created or updated without one.
pub const DEFAULT_TITLE: &str = "Untitled";

/// A stored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Store-assigned identifier, never reused
    pub id: i64,

    /// Note title (never empty)
    pub title: String,

    /// Note body
    pub content: String,

    /// When this note was created
    pub created_at: DateTime<Utc>,

    /// When this note was last updated
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a note.
///
/// Missing or blank titles fall back to [`DEFAULT_TITLE`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub content: String,
}

impl NewNote {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Payload for rewriting an existing note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteUpdate {
    pub id: i64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub content: String,
}

impl NoteUpdate {
    pub fn new(id: i64, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Apply the default title to blank input.
pub fn normalize_title(title: &str) -> String {
    if title.trim().is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title(""), "Untitled");
        assert_eq!(normalize_title("   \n"), "Untitled");
        assert_eq!(normalize_title("  Groceries "), "  Groceries ");
    }

    #[test]
    fn test_new_note_fields_default_when_missing() {
        let parsed: NewNote = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, NewNote::default());

        let parsed: NoteUpdate = serde_json::from_str(r#"{"id": 3, "title": "x"}"#).unwrap();
        assert_eq!(parsed, NoteUpdate::new(3, "x", ""));
    }

    #[test]
    fn test_update_requires_id() {
        let parsed = serde_json::from_str::<NoteUpdate>(r#"{"title": "x"}"#);
        assert!(parsed.is_err());
    }
}
