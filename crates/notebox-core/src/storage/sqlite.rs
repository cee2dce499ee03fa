//! SQLite notes repository.
//!
//! The database is held in memory and the whole image is flushed to disk after
//! every mutation. If the flush fails the in-memory database is restored from
//! the last image known to be on disk.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, SubsecRound, Utc};
use rusqlite::{Connection, OptionalExtension};
use tracing::{error, info};

use crate::error::{NoteboxError, Result};
use crate::storage::gateway::{LoadedStore, PersistenceGateway};
use crate::storage::row::{format_timestamp, NoteRow, NOTE_COLUMNS};
use crate::storage::schema::ensure_schema;
use crate::storage::traits::NoteRepository;
use crate::storage::types::{normalize_title, NewNote, Note, NoteUpdate};

/// File-backed notes store with an in-memory SQLite working copy.
pub struct SqliteNoteStore {
    gateway: PersistenceGateway,
    conn: Connection,
    // Image currently on disk; the rollback target when a flush fails.
    image: Vec<u8>,
}

impl SqliteNoteStore {
    /// Load the store at `path`, creating the file and schema if needed.
    ///
    /// # Errors
    ///
    /// - `NoteboxError::StoreCorrupt` if the file is not a valid notes store
    /// - `NoteboxError::StoreUnavailable` if it cannot be read or created
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let gateway = PersistenceGateway::new(path);
        let LoadedStore {
            conn,
            image,
            is_new,
        } = gateway.load()?;

        let changed = ensure_schema(&conn)?;
        let image = if is_new || changed {
            gateway.flush(&conn).map_err(|e| {
                NoteboxError::StoreUnavailable(format!(
                    "cannot create {}: {}",
                    gateway.path().display(),
                    e
                ))
            })?
        } else {
            image
        };

        Ok(Self {
            gateway,
            conn,
            image,
        })
    }

    /// Path of the store file.
    pub fn path(&self) -> &Path {
        self.gateway.path()
    }

    fn persist(&mut self) -> Result<()> {
        match self.gateway.flush(&self.conn) {
            Ok(image) => {
                self.image = image;
                Ok(())
            }
            Err(err) => {
                if let Err(restore_err) = self.gateway.restore(&mut self.conn, &self.image) {
                    error!(error = %restore_err, "rollback after failed flush did not apply");
                }
                Err(err)
            }
        }
    }
}

/// Next timestamp for a touched note.
///
/// Strictly later than every stored `updated_at`, so listing order always
/// matches touch order even when the clock has not advanced.
fn next_stamp(conn: &Connection) -> Result<DateTime<Utc>> {
    let now = Utc::now().trunc_subsecs(6);
    let latest: Option<String> =
        conn.query_row("SELECT MAX(updated_at) FROM notes", [], |row| row.get(0))?;
    let latest = match latest {
        Some(raw) => DateTime::parse_from_rfc3339(&raw)
            .map_err(|e| NoteboxError::StoreCorrupt(format!("Invalid timestamp: {}", e)))?
            .with_timezone(&Utc),
        None => return Ok(now),
    };
    if now > latest {
        Ok(now)
    } else {
        Ok(latest + Duration::microseconds(1))
    }
}

fn fetch_note(conn: &Connection, id: i64) -> Result<Option<Note>> {
    let row = conn
        .query_row(
            &format!("SELECT {} FROM notes WHERE id = ?", NOTE_COLUMNS),
            [id],
            NoteRow::from_row,
        )
        .optional()?;
    row.map(Note::try_from).transpose()
}

impl NoteRepository for SqliteNoteStore {
    fn list_all(&self) -> Result<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM notes ORDER BY updated_at DESC, id DESC",
            NOTE_COLUMNS
        ))?;
        let rows = stmt
            .query_map([], NoteRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(Note::try_from).collect()
    }

    fn get_by_id(&self, id: i64) -> Result<Option<Note>> {
        fetch_note(&self.conn, id)
    }

    fn create(&mut self, note: &NewNote) -> Result<Note> {
        let title = normalize_title(&note.title);

        let tx = self.conn.transaction()?;
        let stamp = format_timestamp(&next_stamp(&tx)?);
        tx.execute(
            "INSERT INTO notes (title, content, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
            (&title, &note.content, &stamp),
        )?;
        let id = tx.last_insert_rowid();
        let created = fetch_note(&tx, id)?.ok_or_else(|| {
            NoteboxError::StoreCorrupt(format!("note {} vanished after insert", id))
        })?;
        tx.commit()?;

        self.persist()?;
        info!(note_id = id, "note created");
        Ok(created)
    }

    fn update(&mut self, update: &NoteUpdate) -> Result<Option<Note>> {
        if fetch_note(&self.conn, update.id)?.is_none() {
            return Ok(None);
        }
        let title = normalize_title(&update.title);

        let tx = self.conn.transaction()?;
        let stamp = format_timestamp(&next_stamp(&tx)?);
        tx.execute(
            "UPDATE notes SET title = ?1, content = ?2, updated_at = ?3 WHERE id = ?4",
            (&title, &update.content, &stamp, update.id),
        )?;
        let updated = fetch_note(&tx, update.id)?.ok_or_else(|| {
            NoteboxError::StoreCorrupt(format!("note {} vanished during update", update.id))
        })?;
        tx.commit()?;

        self.persist()?;
        info!(note_id = update.id, "note updated");
        Ok(Some(updated))
    }

    fn delete(&mut self, id: i64) -> Result<bool> {
        let tx = self.conn.transaction()?;
        let removed = tx.execute("DELETE FROM notes WHERE id = ?", [id])?;
        if removed == 0 {
            return Ok(false);
        }
        tx.commit()?;

        self.persist()?;
        info!(note_id = id, "note deleted");
        Ok(true)
    }

    fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn close(self) -> Result<()> {
        let path = self.gateway.path().to_path_buf();
        self.conn.close().map_err(|(_, err)| NoteboxError::from(err))?;
        info!(path = %path.display(), "store closed");
        Ok(())
    }

    fn check_integrity(&self) -> Result<()> {
        let mut stmt = self.conn.prepare("PRAGMA integrity_check")?;
        let problems = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        if problems.len() != 1 || problems[0] != "ok" {
            return Err(NoteboxError::StoreCorrupt(format!(
                "integrity check failed: {}",
                problems.join("; ")
            )));
        }

        let inverted: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM notes WHERE created_at > updated_at",
            [],
            |row| row.get(0),
        )?;
        if inverted > 0 {
            return Err(NoteboxError::StoreCorrupt(format!(
                "{} note(s) updated before they were created",
                inverted
            )));
        }

        // Parsing every row catches malformed timestamps.
        self.list_all()?;
        Ok(())
    }
}
