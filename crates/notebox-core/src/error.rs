//! Error types for Notebox core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI and the bridge map
//! these to user-facing messages and failure kinds.

use thiserror::Error;

/// Result type alias for Notebox operations.
pub type Result<T> = std::result::Result<T, NoteboxError>;

/// Core error type for Notebox operations.
#[derive(Debug, Error)]
pub enum NoteboxError {
    /// Store file cannot be opened or created
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Store bytes exist but are not a valid notes store
    #[error("Store corrupt: {0}")]
    StoreCorrupt(String),

    /// Mutation could not be written to disk (rolled back in memory)
    #[error("Flush failed: {0}")]
    FlushFailed(String),

    /// Note not found by ID
    #[error("Note not found: {0}")]
    NoteNotFound(i64),

    /// Invalid user input or malformed request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl NoteboxError {
    /// True for errors that make the whole store unusable until restart.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            NoteboxError::StoreUnavailable(_) | NoteboxError::StoreCorrupt(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(NoteboxError::StoreUnavailable("denied".into()).is_fatal());
        assert!(NoteboxError::StoreCorrupt("garbage".into()).is_fatal());
        assert!(!NoteboxError::FlushFailed("disk full".into()).is_fatal());
        assert!(!NoteboxError::NoteNotFound(7).is_fatal());
    }

    #[test]
    fn test_display_includes_id() {
        let err = NoteboxError::NoteNotFound(42);
        assert_eq!(err.to_string(), "Note not found: 42");
    }
}
