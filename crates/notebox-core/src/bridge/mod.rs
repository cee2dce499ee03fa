//! Query-response bridge between a UI layer and the notes store.
//!
//! A UI sends requests by operation name (`list-all`, `get`, `create`,
//! `update`, `delete`) with a JSON payload and awaits a [`Response`] that
//! echoes the operation and payload. Failures are encoded in the response;
//! nothing panics or errors across this boundary.

mod dispatch;
pub mod protocol;
mod service;

pub use dispatch::execute;
pub use protocol::{
    Failure, FailureKind, Outcome, Request, RequestEnvelope, Response, OPERATIONS,
};
pub use service::NotesBridge;
