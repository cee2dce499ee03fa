//! Note row type for database queries.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;

use crate::error::{NoteboxError, Result};
use crate::storage::types::Note;

/// Columns selected for every note query, in [`NoteRow::from_row`] order.
pub const NOTE_COLUMNS: &str = "id, title, content, created_at, updated_at";

/// Raw row data from the notes table, before parsing into domain types.
#[derive(Debug)]
pub struct NoteRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

impl NoteRow {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }
}

impl TryFrom<NoteRow> for Note {
    type Error = NoteboxError;

    fn try_from(row: NoteRow) -> Result<Self> {
        Ok(Note {
            id: row.id,
            title: row.title,
            content: row.content,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

/// Encode a timestamp so that lexical order matches chronological order.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|value| value.with_timezone(&Utc))
        .map_err(|e| NoteboxError::StoreCorrupt(format!("Invalid timestamp {:?}: {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_format_sorts_lexically() {
        let earlier = Utc.with_ymd_and_hms(2024, 1, 9, 23, 59, 59).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let a = format_timestamp(&earlier);
        let b = format_timestamp(&later);
        assert!(a < b);
        assert_eq!(a, "2024-01-09T23:59:59.000000Z");
    }

    #[test]
    fn test_bad_timestamp_is_corrupt() {
        let row = NoteRow {
            id: 1,
            title: "t".into(),
            content: String::new(),
            created_at: "yesterday".into(),
            updated_at: "2024-01-10T00:00:00.000000Z".into(),
        };
        let err = Note::try_from(row).unwrap_err();
        assert!(matches!(err, NoteboxError::StoreCorrupt(_)));
    }
}
