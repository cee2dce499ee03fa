//! Notes repository trait definition.
//!
//! The `NoteRepository` trait is the contract the bridge dispatches against.
//! Absent notes are a normal negative result (`None` / `false`), not an error.

use super::types::{NewNote, Note, NoteUpdate};
use crate::error::Result;

/// CRUD access to a loaded notes store.
///
/// All implementations must ensure:
/// - Every successful mutation is flushed before it returns
/// - A failed mutation leaves memory and disk unchanged
/// - Identifiers are never reused
pub trait NoteRepository {
    /// List every note, most recently updated first.
    fn list_all(&self) -> Result<Vec<Note>>;

    /// Fetch a note by ID.
    fn get_by_id(&self, id: i64) -> Result<Option<Note>>;

    /// Create a note and return the complete stored record.
    ///
    /// # Errors
    ///
    /// Returns `NoteboxError::FlushFailed` if the new note could not be
    /// written; the note is not kept in memory either.
    fn create(&mut self, note: &NewNote) -> Result<Note>;

    /// Rewrite a note's title and content.
    ///
    /// # Returns
    ///
    /// The updated record, or `None` if no note has this ID.
    fn update(&mut self, update: &NoteUpdate) -> Result<Option<Note>>;

    /// Remove a note.
    ///
    /// # Returns
    ///
    /// `true` if the note existed and was deleted.
    fn delete(&mut self, id: i64) -> Result<bool>;

    /// Number of stored notes.
    fn count(&self) -> Result<u64>;

    /// Release the store.
    ///
    /// Every mutation has already been flushed, so this writes nothing.
    /// After calling this method, the store instance can no longer be used.
    fn close(self) -> Result<()>
    where
        Self: Sized;

    /// Verify the store image and the note invariants.
    ///
    /// # Errors
    ///
    /// Returns `NoteboxError::StoreCorrupt` describing the first problem found.
    fn check_integrity(&self) -> Result<()>;
}
