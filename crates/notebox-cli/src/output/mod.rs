//! Output formatting helpers for the CLI.
//!
//! This module provides formatting utilities for displaying notes
//! in various formats (JSON, table, plain text).

mod json;
mod text;

// Re-export public API
pub use json::{note_json, notes_json, print_json};
pub use text::{print_note, print_note_list};
