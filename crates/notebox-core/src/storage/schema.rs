//! Notes schema creation.
//!
//! The schema version is mirrored to `PRAGMA user_version`. A store written by
//! a newer binary is refused rather than downgraded.

use rusqlite::Connection;
use tracing::debug;

use crate::error::{NoteboxError, Result};

/// Schema version written by this binary.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS notes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL DEFAULT 'Untitled',
        content TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,

        CHECK (created_at <= updated_at)
    );

    CREATE INDEX IF NOT EXISTS idx_notes_updated_at ON notes (updated_at DESC);
"#;

/// Create the notes table and its index if absent.
///
/// Idempotent. Returns `true` when anything was created or the version was
/// bumped, so the caller knows the image on disk is stale.
///
/// # Errors
///
/// Returns `NoteboxError::StoreCorrupt` if the store reports a newer schema
/// version or already holds a `notes` table of another shape, and
/// `NoteboxError::StoreUnavailable` if the DDL cannot run otherwise.
pub fn ensure_schema(conn: &Connection) -> Result<bool> {
    let version = user_version(conn)?;
    if version > SCHEMA_VERSION {
        return Err(NoteboxError::StoreCorrupt(format!(
            "unsupported schema version {} (latest supported {})",
            version, SCHEMA_VERSION
        )));
    }
    let had_notes = notes_table_exists(conn)?;
    if version == SCHEMA_VERSION && had_notes {
        return Ok(false);
    }

    conn.execute_batch(SCHEMA_SQL)
        .and_then(|_| conn.execute_batch(&format!("PRAGMA user_version = {};", SCHEMA_VERSION)))
        .map_err(|e| {
            // A foreign `notes` table is data we must not reshape.
            if had_notes {
                NoteboxError::StoreCorrupt(format!("existing notes table is not a notes store: {}", e))
            } else {
                NoteboxError::StoreUnavailable(format!("schema creation failed: {}", e))
            }
        })?;
    debug!(from = version, to = SCHEMA_VERSION, "notes schema created");
    Ok(true)
}

fn user_version(conn: &Connection) -> Result<u32> {
    conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))
        .map_err(|e| NoteboxError::StoreCorrupt(format!("cannot read schema version: {}", e)))
}

fn notes_table_exists(conn: &Connection) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'notes'",
        [],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}
