//! Persistence gateway: the on-disk image of the notes store.
//!
//! The store lives in an in-memory SQLite database. `load` deserializes the
//! file into memory and `flush` serializes the whole database back out,
//! replacing the file atomically. Nothing else reads or writes the file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;
use std::time::Instant;

use rusqlite::serialize::OwnedData;
use rusqlite::{Connection, DatabaseName};
use tracing::{debug, error, info, warn};

use crate::error::{NoteboxError, Result};

const SQLITE_HEADER: &[u8; 16] = b"SQLite format 3\0";

/// A freshly loaded store.
pub struct LoadedStore {
    pub conn: Connection,

    /// Bytes read from disk; empty when the file did not exist.
    pub image: Vec<u8>,

    /// True when no file existed and an empty database was created.
    pub is_new: bool,
}

/// Owns the path of the store file and every byte written to it.
#[derive(Debug, Clone)]
pub struct PersistenceGateway {
    path: PathBuf,
}

impl PersistenceGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the store image into a new in-memory connection.
    ///
    /// A missing file yields an empty database with `is_new` set.
    ///
    /// # Errors
    ///
    /// - `NoteboxError::StoreCorrupt` if the file exists but is not a readable
    ///   SQLite image. The file is left untouched.
    /// - `NoteboxError::StoreUnavailable` if the file cannot be read.
    pub fn load(&self) -> Result<LoadedStore> {
        let started_at = Instant::now();
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                let conn = open_memory()?;
                info!(path = %self.path.display(), "no store file, starting empty");
                return Ok(LoadedStore {
                    conn,
                    image: Vec::new(),
                    is_new: true,
                });
            }
            Err(err) => {
                error!(path = %self.path.display(), error = %err, "store read failed");
                return Err(NoteboxError::StoreUnavailable(format!(
                    "cannot read {}: {}",
                    self.path.display(),
                    err
                )));
            }
        };

        let conn = match connection_from_image(&bytes) {
            Ok(conn) => conn,
            Err(err) => {
                // Leave the file alone; it may still be recoverable by hand.
                error!(path = %self.path.display(), error = %err, "store image rejected");
                return Err(err);
            }
        };

        info!(
            path = %self.path.display(),
            bytes = bytes.len(),
            duration_ms = started_at.elapsed().as_millis() as u64,
            "store loaded"
        );
        Ok(LoadedStore {
            conn,
            image: bytes,
            is_new: false,
        })
    }

    /// Serialize the whole database and replace the store file with it.
    ///
    /// Returns the image that is now on disk.
    ///
    /// # Errors
    ///
    /// Returns `NoteboxError::FlushFailed` if serialization or the write fails.
    pub fn flush(&self, conn: &Connection) -> Result<Vec<u8>> {
        let started_at = Instant::now();
        let image = snapshot(conn)?;
        crate::fs::write_atomic(&self.path, &image).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "store flush failed");
            NoteboxError::FlushFailed(format!("cannot write {}: {}", self.path.display(), e))
        })?;
        debug!(
            path = %self.path.display(),
            bytes = image.len(),
            duration_ms = started_at.elapsed().as_millis() as u64,
            "store flushed"
        );
        Ok(image)
    }

    /// Replace the contents of `conn` with a previously flushed image.
    pub fn restore(&self, conn: &mut Connection, image: &[u8]) -> Result<()> {
        let owned = owned_data_from_bytes(image)?;
        conn.deserialize(DatabaseName::Main, owned, false)
            .map_err(|e| NoteboxError::StoreCorrupt(format!("cannot restore image: {}", e)))?;
        Ok(())
    }
}

fn open_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()
        .map_err(|e| NoteboxError::StoreUnavailable(format!("cannot open SQLite: {}", e)))?;
    Ok(conn)
}

fn snapshot(conn: &Connection) -> Result<Vec<u8>> {
    let data = conn
        .serialize(DatabaseName::Main)
        .map_err(|e| NoteboxError::FlushFailed(format!("serialize failed: {}", e)))?;
    Ok(data.as_ref().to_vec())
}

fn connection_from_image(bytes: &[u8]) -> Result<Connection> {
    if bytes.len() < SQLITE_HEADER.len() || &bytes[..SQLITE_HEADER.len()] != SQLITE_HEADER {
        return Err(NoteboxError::StoreCorrupt(
            "file is not a SQLite database".to_string(),
        ));
    }

    let mut conn = open_memory()?;
    let owned = owned_data_from_bytes(bytes)?;
    conn.deserialize(DatabaseName::Main, owned, false)
        .map_err(|e| NoteboxError::StoreCorrupt(format!("cannot deserialize: {}", e)))?;

    // Deserialize is lazy; touching the schema forces the header and first
    // page to be parsed.
    conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| {
        row.get::<_, i64>(0)
    })
    .map_err(|e| NoteboxError::StoreCorrupt(format!("unreadable schema: {}", e)))?;

    Ok(conn)
}

fn owned_data_from_bytes(bytes: &[u8]) -> Result<OwnedData> {
    if bytes.is_empty() {
        return Err(NoteboxError::StoreCorrupt(
            "SQLite payload is empty".to_string(),
        ));
    }

    let size: i32 = bytes
        .len()
        .try_into()
        .map_err(|_| NoteboxError::StoreCorrupt("SQLite payload too large".to_string()))?;

    // SAFETY: sqlite3_malloc returns a valid pointer or null; null is checked
    // immediately below. The size has been validated to fit in i32.
    let raw = unsafe { rusqlite::ffi::sqlite3_malloc(size) as *mut u8 };
    if raw.is_null() {
        return Err(NoteboxError::StoreUnavailable(
            "SQLite allocation failed".to_string(),
        ));
    }

    // SAFETY:
    // - `raw` was allocated above with exactly `bytes.len()` bytes and is non-null
    // - `bytes` is valid for reads of `bytes.len()` bytes and does not overlap `raw`
    // - `OwnedData::from_raw_nonnull` takes ownership of the sqlite3_malloc'd
    //   buffer, which SQLite frees when the data is dropped or consumed
    unsafe {
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), raw, bytes.len());
        let ptr = NonNull::new(raw).ok_or_else(|| {
            NoteboxError::StoreUnavailable("SQLite allocation returned null".to_string())
        })?;
        Ok(OwnedData::from_raw_nonnull(ptr, bytes.len()))
    }
}
