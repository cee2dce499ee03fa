use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use notebox_core::storage::{PersistenceGateway, SqliteNoteStore};
use notebox_core::{NewNote, NoteRepository, NoteUpdate, NoteboxError};

struct TempStore {
    dir: PathBuf,
    path: PathBuf,
}

impl TempStore {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be available")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("{}_{}_{}", prefix, std::process::id(), nanos));
        fs::create_dir_all(&dir).expect("temp dir should be created");
        let path = dir.join("notes.db");
        Self { dir, path }
    }

    fn open(&self) -> SqliteNoteStore {
        SqliteNoteStore::open(&self.path).expect("open should succeed")
    }
}

impl Drop for TempStore {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

#[test]
fn test_create_then_get_round_trip() {
    let temp = TempStore::new("notebox_round_trip");
    let mut store = temp.open();

    let created = store
        .create(&NewNote::new("Standup", "talk about the release"))
        .expect("create should succeed");
    let fetched = store
        .get_by_id(created.id)
        .expect("get should succeed")
        .expect("note should exist");

    assert_eq!(fetched.title, "Standup");
    assert_eq!(fetched.content, "talk about the release");
    assert_eq!(fetched.created_at, fetched.updated_at);
    assert_eq!(fetched, created);
}

#[test]
fn test_list_orders_by_most_recent_update() {
    let temp = TempStore::new("notebox_ordering");
    let mut store = temp.open();

    let a = store.create(&NewNote::new("A", "")).unwrap();
    let b = store.create(&NewNote::new("B", "")).unwrap();
    let c = store.create(&NewNote::new("C", "")).unwrap();
    store
        .update(&NoteUpdate::new(a.id, "A", "edited"))
        .unwrap()
        .expect("A should exist");

    let ids: Vec<i64> = store.list_all().unwrap().iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![a.id, c.id, b.id]);
}

#[test]
fn test_list_empty_store() {
    let temp = TempStore::new("notebox_empty");
    let store = temp.open();

    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn test_delete_semantics() {
    let temp = TempStore::new("notebox_delete");
    let mut store = temp.open();
    let note = store.create(&NewNote::new("gone soon", "")).unwrap();

    assert!(store.delete(note.id).unwrap());
    assert!(store.get_by_id(note.id).unwrap().is_none());
    assert!(!store.delete(note.id).unwrap());
    assert!(!store.delete(12345).unwrap());
}

#[test]
fn test_create_defaults() {
    let temp = TempStore::new("notebox_defaults");
    let mut store = temp.open();

    let note = store.create(&NewNote::new("", "")).unwrap();

    assert_eq!(note.title, "Untitled");
    assert_eq!(note.content, "");
}

#[test]
fn test_reload_after_create_is_durable() {
    let temp = TempStore::new("notebox_durable");
    let created = {
        let mut store = temp.open();
        store.create(&NewNote::new("Keep me", "across restarts")).unwrap()
    };

    let reopened = temp.open();
    let fetched = reopened.get_by_id(created.id).unwrap().expect("note should survive");
    assert_eq!(fetched, created);
}

#[test]
fn test_every_mutation_is_flushed() {
    let temp = TempStore::new("notebox_flush_each");
    let mut store = temp.open();
    let gateway = PersistenceGateway::new(&temp.path);

    let note = store.create(&NewNote::new("one", "")).unwrap();
    let on_disk = SqliteNoteStore::open(&temp.path).unwrap();
    assert_eq!(on_disk.count().unwrap(), 1);

    store.update(&NoteUpdate::new(note.id, "two", "")).unwrap();
    let loaded = gateway.load().unwrap();
    let title: String = loaded
        .conn
        .query_row("SELECT title FROM notes WHERE id = ?", [note.id], |row| row.get(0))
        .unwrap();
    assert_eq!(title, "two");

    store.delete(note.id).unwrap();
    assert_eq!(SqliteNoteStore::open(&temp.path).unwrap().count().unwrap(), 0);
}

#[test]
fn test_corrupt_store_is_not_overwritten() {
    let temp = TempStore::new("notebox_corrupt");
    fs::write(&temp.path, b"SQLite format 3\0 but then the rest is noise").unwrap();

    let result = SqliteNoteStore::open(&temp.path);

    assert!(matches!(result, Err(NoteboxError::StoreCorrupt(_))));
    assert_eq!(
        fs::read(&temp.path).unwrap(),
        b"SQLite format 3\0 but then the rest is noise"
    );
}

#[test]
fn test_foreign_sqlite_file_is_corrupt_and_untouched() {
    let temp = TempStore::new("notebox_foreign");
    {
        let conn = rusqlite::Connection::open(&temp.path).unwrap();
        conn.execute_batch("CREATE TABLE notes (body TEXT); INSERT INTO notes VALUES ('theirs');")
            .unwrap();
    }
    let before = fs::read(&temp.path).unwrap();

    let result = SqliteNoteStore::open(&temp.path);

    assert!(matches!(result, Err(NoteboxError::StoreCorrupt(_))));
    assert_eq!(fs::read(&temp.path).unwrap(), before);
}

#[test]
fn test_flush_failure_rolls_back() {
    let temp = TempStore::new("notebox_flush_fail");
    let mut store = temp.open();
    store.create(&NewNote::new("before", "")).unwrap();

    // A non-empty directory in place of the store file makes the rename fail.
    fs::remove_file(&temp.path).unwrap();
    fs::create_dir(&temp.path).unwrap();
    fs::write(temp.path.join("blocker"), b"x").unwrap();

    let err = store.create(&NewNote::new("after", "")).unwrap_err();

    assert!(matches!(err, NoteboxError::FlushFailed(_)));
    let titles: Vec<String> = store.list_all().unwrap().into_iter().map(|n| n.title).collect();
    assert_eq!(titles, vec!["before".to_string()]);
}

#[test]
fn test_open_in_unwritable_location_is_unavailable() {
    let temp = TempStore::new("notebox_unavailable");
    // A regular file where the parent directory should be.
    let blocker = temp.dir.join("not-a-dir");
    fs::write(&blocker, b"x").unwrap();

    let result = SqliteNoteStore::open(blocker.join("notes.db"));

    assert!(matches!(result, Err(NoteboxError::StoreUnavailable(_))));
}

#[test]
fn test_integrity_check_passes_after_churn() {
    let temp = TempStore::new("notebox_integrity");
    let mut store = temp.open();
    for i in 0..10 {
        let note = store.create(&NewNote::new(format!("n{}", i), "x")).unwrap();
        if i % 3 == 0 {
            store.delete(note.id).unwrap();
        } else {
            store.update(&NoteUpdate::new(note.id, "renamed", "y")).unwrap();
        }
    }

    store.check_integrity().unwrap();
    assert_eq!(store.count().unwrap(), 6);
}
