//! Storage layer for Notebox.
//!
//! The notes store is one SQLite database image on disk. It is loaded into an
//! in-memory database, mutated there, and written back whole after every
//! mutation.
//!
//! ## Components
//!
//! - `schema`: idempotent table and index creation
//! - `gateway`: load and flush of the on-disk image
//! - `sqlite`: the `NoteRepository` implementation
//!
//! Only the gateway touches the file; only the repository mutates the
//! in-memory database.

pub mod gateway;
mod row;
pub mod schema;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use gateway::{LoadedStore, PersistenceGateway};
pub use schema::{ensure_schema, SCHEMA_VERSION};
pub use sqlite::SqliteNoteStore;
pub use traits::NoteRepository;
pub use types::{normalize_title, NewNote, Note, NoteUpdate, DEFAULT_TITLE};
