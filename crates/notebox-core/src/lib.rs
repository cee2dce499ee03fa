//! # Notebox Core
//!
//! Core library for Notebox - the local notes store embedded in the Notebox
//! desktop launcher.
//!
//! This crate provides the note data model, the SQLite-backed store and the
//! request/response bridge, independent of any UI or CLI front-end.
//!
//! ## Architecture
//!
//! - **storage**: schema initializer, persistence gateway and notes repository
//! - **bridge**: name-dispatched requests with asynchronous responses
//! - **fs**: atomic file replacement helpers

pub mod bridge;
pub mod error;
pub mod fs;
pub mod storage;

pub use bridge::{NotesBridge, Outcome, Request, Response};
pub use error::{NoteboxError, Result};
pub use storage::{NewNote, Note, NoteRepository, NoteUpdate, SqliteNoteStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
