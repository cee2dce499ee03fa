//! Bridge worker and its cloneable handle.
//!
//! One worker owns the store and runs requests in arrival order on a tokio
//! blocking thread. The store is opened on the first request. If opening
//! fails, every request gets that failure until the process restarts.

use std::path::PathBuf;

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};

use super::dispatch::execute;
use super::protocol::{Failure, FailureKind, Outcome, Request, Response};
use crate::error::Result;
use crate::storage::{NoteRepository, SqliteNoteStore};

const REQUEST_QUEUE_DEPTH: usize = 64;

enum Command {
    Call {
        request: Request,
        reply: oneshot::Sender<Outcome>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

/// Handle for sending requests to the notes worker.
///
/// Cloning the handle shares the same worker. The worker stops when
/// [`NotesBridge::shutdown`] is called or every handle is dropped.
#[derive(Clone)]
pub struct NotesBridge {
    tx: mpsc::Sender<Command>,
}

impl NotesBridge {
    /// Start a worker for the notes store at `path`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::spawn_with(move || SqliteNoteStore::open(path))
    }

    /// Start a worker whose store is produced by `open` on first use.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_with<R, F>(open: F) -> Self
    where
        R: NoteRepository + 'static,
        F: FnOnce() -> Result<R> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(REQUEST_QUEUE_DEPTH);
        tokio::task::spawn_blocking(move || run_worker(open, rx));
        Self { tx }
    }

    /// Send a parsed request and wait for its response.
    ///
    /// The response payload is the request re-serialized, defaults included.
    pub async fn request(&self, request: Request) -> Response {
        let outcome = self.call(request.clone()).await;
        Response::new(&request, outcome)
    }

    /// Send a request by operation name and raw payload.
    ///
    /// The response echoes `payload` exactly as given. Malformed requests are
    /// answered directly with an `invalid_request` failure and never reach
    /// the store.
    pub async fn dispatch(&self, operation: &str, payload: Value) -> Response {
        match Request::from_parts(operation, payload.clone()) {
            Ok(request) => Response {
                operation: request.name().to_string(),
                outcome: self.call(request).await,
                payload,
            },
            Err(err) => Response::rejected(operation, payload, &err),
        }
    }

    async fn call(&self, request: Request) -> Outcome {
        let (reply, response) = oneshot::channel();
        match self.tx.send(Command::Call { request, reply }).await {
            Ok(()) => response.await.unwrap_or_else(|_| bridge_closed()),
            Err(_) => bridge_closed(),
        }
    }

    /// Finish queued requests, close the store and stop the worker.
    pub async fn shutdown(self) {
        let (reply, done) = oneshot::channel();
        if self.tx.send(Command::Shutdown { reply }).await.is_ok() {
            let _ = done.await;
        }
    }
}

fn bridge_closed() -> Outcome {
    Outcome::Failed(bridge_closed_failure())
}

enum StoreSlot<R, F> {
    Pending(F),
    Ready(R),
    Failed(Failure),
    Closed,
}

impl<R, F> StoreSlot<R, F>
where
    R: NoteRepository,
    F: FnOnce() -> Result<R>,
{
    fn acquire(&mut self) -> std::result::Result<&mut R, Failure> {
        let current = std::mem::replace(self, StoreSlot::Closed);
        *self = match current {
            StoreSlot::Pending(open) => match open() {
                Ok(store) => {
                    info!("notes store ready");
                    StoreSlot::Ready(store)
                }
                Err(err) => {
                    error!(error = %err, "notes store failed to load");
                    StoreSlot::Failed(Failure::from(&err))
                }
            },
            other => other,
        };

        match self {
            StoreSlot::Ready(store) => Ok(store),
            StoreSlot::Failed(failure) => Err(failure.clone()),
            StoreSlot::Pending(_) | StoreSlot::Closed => Err(bridge_closed_failure()),
        }
    }

    fn close(&mut self) {
        if let StoreSlot::Ready(store) = std::mem::replace(self, StoreSlot::Closed) {
            if let Err(err) = store.close() {
                error!(error = %err, "notes store did not close cleanly");
            }
        }
    }
}

fn bridge_closed_failure() -> Failure {
    Failure::new(FailureKind::StoreUnavailable, "notes bridge is shut down")
}

fn run_worker<R, F>(open: F, mut rx: mpsc::Receiver<Command>)
where
    R: NoteRepository,
    F: FnOnce() -> Result<R>,
{
    debug!("notes bridge worker started");
    let mut slot = StoreSlot::Pending(open);

    while let Some(command) = rx.blocking_recv() {
        match command {
            Command::Call { request, reply } => {
                debug!(operation = request.name(), "bridge request");
                let outcome = match slot.acquire() {
                    Ok(store) => execute(store, &request),
                    Err(failure) => Outcome::Failed(failure),
                };
                // The caller may have stopped waiting; the work is done either way.
                let _ = reply.send(outcome);
            }
            Command::Shutdown { reply } => {
                slot.close();
                let _ = reply.send(());
                debug!("notes bridge worker stopped");
                return;
            }
        }
    }

    slot.close();
    debug!("notes bridge worker stopped");
}
