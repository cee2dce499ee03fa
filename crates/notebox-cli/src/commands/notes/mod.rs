pub mod delete;
pub mod edit;
pub mod list;
pub mod new;
pub mod show;

pub use delete::handle_delete;
pub use edit::handle_edit;
pub use list::handle_list;
pub use new::handle_new;
pub use show::handle_show;

use notebox_core::{Note, Outcome};

/// Unwrap a single-note outcome, mapping absence to a not-found error.
pub(crate) fn expect_note(outcome: Outcome, id: i64) -> anyhow::Result<Note> {
    match outcome {
        Outcome::Note(note) => Ok(note),
        Outcome::NotFound => Err(crate::errors::note_not_found(id).into()),
        other => Err(unexpected(other)),
    }
}

pub(crate) fn unexpected(outcome: Outcome) -> anyhow::Error {
    anyhow::anyhow!("Unexpected bridge response: {:?}", outcome)
}
