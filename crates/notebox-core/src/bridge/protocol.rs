//! Bridge request and response types.
//!
//! Requests are addressed by operation name and carry a JSON payload:
//!
//! ```json
//! {"operation": "update", "payload": {"id": 3, "title": "Plan", "content": "..."}}
//! ```
//!
//! Responses echo the operation and payload so a UI can route them, and carry
//! a `status` plus optional `data`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{NoteboxError, Result};
use crate::storage::{NewNote, Note, NoteUpdate};

/// Operation names accepted by [`Request::from_parts`].
pub const OPERATIONS: &[&str] = &["list-all", "get", "create", "update", "delete"];

/// A parsed bridge request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", content = "payload", rename_all = "kebab-case")]
pub enum Request {
    ListAll,
    Get(i64),
    Create(NewNote),
    Update(NoteUpdate),
    Delete(i64),
}

impl Request {
    /// Parse a request from its operation name and raw payload.
    ///
    /// # Errors
    ///
    /// Returns `NoteboxError::InvalidInput` for unknown operations or payloads
    /// of the wrong shape.
    pub fn from_parts(operation: &str, payload: Value) -> Result<Self> {
        if !OPERATIONS.contains(&operation) {
            return Err(NoteboxError::InvalidInput(format!(
                "unknown operation {:?}",
                operation
            )));
        }
        if operation == "list-all" {
            return Ok(Request::ListAll);
        }

        let envelope = serde_json::json!({ "operation": operation, "payload": payload });
        serde_json::from_value(envelope).map_err(|e| {
            NoteboxError::InvalidInput(format!("invalid payload for {}: {}", operation, e))
        })
    }

    /// The wire name of this operation.
    pub fn name(&self) -> &'static str {
        match self {
            Request::ListAll => "list-all",
            Request::Get(_) => "get",
            Request::Create(_) => "create",
            Request::Update(_) => "update",
            Request::Delete(_) => "delete",
        }
    }

    /// The payload as it appears on the wire (`null` for `list-all`).
    pub fn payload(&self) -> Value {
        match self {
            Request::ListAll => Value::Null,
            Request::Get(id) | Request::Delete(id) => Value::from(*id),
            Request::Create(note) => serde_json::to_value(note).unwrap_or(Value::Null),
            Request::Update(update) => serde_json::to_value(update).unwrap_or(Value::Null),
        }
    }
}

/// Loosely typed request as read from a line of JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestEnvelope {
    pub operation: String,

    #[serde(default)]
    pub payload: Value,
}

/// Result of one bridge operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Outcome {
    /// `list-all` result, most recently updated first
    Notes(Vec<Note>),

    /// `get`, `create` or `update` result
    Note(Note),

    /// `delete` succeeded
    Deleted,

    /// No note has the requested ID
    NotFound,

    /// The operation did not complete
    Failed(Failure),
}

impl Outcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// Why an operation failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    StoreUnavailable,
    StoreCorrupt,
    FlushFailed,
    InvalidRequest,
    Internal,
}

impl From<&NoteboxError> for Failure {
    fn from(err: &NoteboxError) -> Self {
        let kind = match err {
            NoteboxError::StoreUnavailable(_) => FailureKind::StoreUnavailable,
            NoteboxError::StoreCorrupt(_) => FailureKind::StoreCorrupt,
            NoteboxError::FlushFailed(_) => FailureKind::FlushFailed,
            NoteboxError::InvalidInput(_) => FailureKind::InvalidRequest,
            _ => FailureKind::Internal,
        };
        Failure::new(kind, err.to_string())
    }
}

/// A response routed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub operation: String,

    #[serde(default)]
    pub payload: Value,

    #[serde(flatten)]
    pub outcome: Outcome,
}

impl Response {
    pub fn new(request: &Request, outcome: Outcome) -> Self {
        Self {
            operation: request.name().to_string(),
            payload: request.payload(),
            outcome,
        }
    }

    /// Response for a request that could not be parsed.
    pub fn rejected(operation: impl Into<String>, payload: Value, err: &NoteboxError) -> Self {
        Self {
            operation: operation.into(),
            payload,
            outcome: Outcome::Failed(Failure::from(err)),
        }
    }
}
