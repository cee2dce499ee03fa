//! Runs one request against a repository.

use tracing::{error, warn};

use super::protocol::{Failure, Outcome, Request};
use crate::error::NoteboxError;
use crate::storage::NoteRepository;

/// Execute `request` and fold every error into the outcome.
pub fn execute<R: NoteRepository>(repo: &mut R, request: &Request) -> Outcome {
    let result = match request {
        Request::ListAll => repo.list_all().map(Outcome::Notes),
        Request::Get(id) => repo
            .get_by_id(*id)
            .map(|found| found.map_or(Outcome::NotFound, Outcome::Note)),
        Request::Create(note) => repo.create(note).map(Outcome::Note),
        Request::Update(update) => repo
            .update(update)
            .map(|found| found.map_or(Outcome::NotFound, Outcome::Note)),
        Request::Delete(id) => repo.delete(*id).map(|removed| {
            if removed {
                Outcome::Deleted
            } else {
                Outcome::NotFound
            }
        }),
    };

    match result {
        Ok(outcome) => outcome,
        Err(NoteboxError::NoteNotFound(_)) => Outcome::NotFound,
        Err(err) => {
            if err.is_fatal() {
                error!(operation = request.name(), error = %err, "notes store unusable");
            } else {
                warn!(operation = request.name(), error = %err, "bridge operation failed");
            }
            Outcome::Failed(Failure::from(&err))
        }
    }
}
