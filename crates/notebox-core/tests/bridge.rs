use std::fs;

use serde_json::{json, Value};
use tempfile::tempdir;

use notebox_core::bridge::{FailureKind, NotesBridge, Outcome, Request};
use notebox_core::{NewNote, NoteUpdate, NoteboxError};

fn expect_note(outcome: Outcome) -> notebox_core::Note {
    match outcome {
        Outcome::Note(note) => note,
        other => panic!("expected a note, got {:?}", other),
    }
}

#[tokio::test]
async fn test_crud_through_bridge() {
    let dir = tempdir().unwrap();
    let bridge = NotesBridge::spawn(dir.path().join("notes.db"));

    let created = bridge
        .request(Request::Create(NewNote::new("Ideas", "first")))
        .await;
    assert_eq!(created.operation, "create");
    let note = expect_note(created.outcome);

    let updated = bridge
        .request(Request::Update(NoteUpdate::new(note.id, "Ideas", "second")))
        .await;
    let updated = expect_note(updated.outcome);
    assert_eq!(updated.content, "second");
    assert_eq!(updated.created_at, note.created_at);

    let listed = bridge.request(Request::ListAll).await;
    match listed.outcome {
        Outcome::Notes(notes) => assert_eq!(notes, vec![updated.clone()]),
        other => panic!("expected notes, got {:?}", other),
    }

    let deleted = bridge.request(Request::Delete(note.id)).await;
    assert_eq!(deleted.outcome, Outcome::Deleted);
    assert_eq!(deleted.payload, json!(note.id));

    let missing = bridge.request(Request::Get(note.id)).await;
    assert_eq!(missing.outcome, Outcome::NotFound);

    bridge.shutdown().await;
}

#[tokio::test]
async fn test_dispatch_by_name_echoes_payload() {
    let dir = tempdir().unwrap();
    let bridge = NotesBridge::spawn(dir.path().join("notes.db"));

    let payload = json!({"title": "", "content": "body"});
    let response = bridge.dispatch("create", payload.clone()).await;

    assert_eq!(response.operation, "create");
    assert_eq!(response.payload, payload);
    let note = expect_note(response.outcome);
    assert_eq!(note.title, "Untitled");

    let fetched = bridge.dispatch("get", json!(note.id)).await;
    assert_eq!(expect_note(fetched.outcome), note);

    bridge.shutdown().await;
}

#[tokio::test]
async fn test_dispatch_echoes_partial_payload_verbatim() {
    let dir = tempdir().unwrap();
    let bridge = NotesBridge::spawn(dir.path().join("notes.db"));

    let payload = json!({"title": "x", "client_ref": 17});
    let response = bridge.dispatch("create", payload.clone()).await;

    assert_eq!(response.payload, payload);
    let note = expect_note(response.outcome);
    assert_eq!(note.title, "x");
    assert_eq!(note.content, "");

    let update = json!({"id": note.id, "content": "later"});
    let response = bridge.dispatch("update", update.clone()).await;
    assert_eq!(response.payload, update);
    assert_eq!(expect_note(response.outcome).title, "Untitled");

    bridge.shutdown().await;
}

#[tokio::test]
async fn test_unknown_operation_is_invalid_request() {
    let dir = tempdir().unwrap();
    let bridge = NotesBridge::spawn(dir.path().join("notes.db"));

    let response = bridge.dispatch("truncate", Value::Null).await;

    assert_eq!(response.operation, "truncate");
    match response.outcome {
        Outcome::Failed(failure) => assert_eq!(failure.kind, FailureKind::InvalidRequest),
        other => panic!("expected failure, got {:?}", other),
    }
    bridge.shutdown().await;
}

#[tokio::test]
async fn test_load_failure_is_sticky() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.db");
    fs::write(&path, b"not a database at all").unwrap();
    let bridge = NotesBridge::spawn(&path);

    for _ in 0..2 {
        let response = bridge.request(Request::ListAll).await;
        match response.outcome {
            Outcome::Failed(failure) => assert_eq!(failure.kind, FailureKind::StoreCorrupt),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    // Repairing the file does not revive a store that already failed.
    fs::remove_file(&path).unwrap();
    let response = bridge
        .request(Request::Create(NewNote::new("late", "")))
        .await;
    assert!(response.outcome.is_failed());
    assert!(!path.exists());

    bridge.shutdown().await;
}

#[tokio::test]
async fn test_store_opens_lazily() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.db");
    let bridge = NotesBridge::spawn(&path);

    tokio::task::yield_now().await;
    assert!(!path.exists());

    bridge.request(Request::ListAll).await;
    assert!(path.exists());

    bridge.shutdown().await;
}

#[tokio::test]
async fn test_custom_opener_error_surfaces() {
    let bridge = NotesBridge::spawn_with(|| -> notebox_core::Result<notebox_core::SqliteNoteStore> {
        Err(NoteboxError::StoreUnavailable("permission denied".into()))
    });

    let response = bridge.request(Request::Get(1)).await;
    match response.outcome {
        Outcome::Failed(failure) => {
            assert_eq!(failure.kind, FailureKind::StoreUnavailable);
            assert!(failure.message.contains("permission denied"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
    bridge.shutdown().await;
}

#[tokio::test]
async fn test_requests_after_shutdown_fail() {
    let dir = tempdir().unwrap();
    let bridge = NotesBridge::spawn(dir.path().join("notes.db"));
    let other = bridge.clone();

    bridge.shutdown().await;

    let response = other.request(Request::ListAll).await;
    match response.outcome {
        Outcome::Failed(failure) => assert_eq!(failure.kind, FailureKind::StoreUnavailable),
        outcome => panic!("expected failure, got {:?}", outcome),
    }
}

#[tokio::test]
async fn test_concurrent_callers_are_serialized() {
    let dir = tempdir().unwrap();
    let bridge = NotesBridge::spawn(dir.path().join("notes.db"));

    let mut handles = Vec::new();
    for i in 0..8 {
        let bridge = bridge.clone();
        handles.push(tokio::spawn(async move {
            bridge
                .request(Request::Create(NewNote::new(format!("note {}", i), "")))
                .await
        }));
    }
    let mut ids = Vec::new();
    for handle in handles {
        ids.push(expect_note(handle.await.unwrap().outcome).id);
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 8);

    match bridge.request(Request::ListAll).await.outcome {
        Outcome::Notes(notes) => assert_eq!(notes.len(), 8),
        other => panic!("expected notes, got {:?}", other),
    }
    bridge.shutdown().await;
}
