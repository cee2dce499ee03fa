use notebox_core::{Outcome, Request};

use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::output::{notes_json, print_json, print_note_list};

use super::unexpected;

pub async fn handle_list(ctx: &AppContext<'_>, args: &ListArgs) -> anyhow::Result<()> {
    let mut notes = match ctx.call(Request::ListAll).await? {
        Outcome::Notes(notes) => notes,
        other => return Err(unexpected(other)),
    };
    if let Some(limit) = args.limit {
        notes.truncate(limit);
    }

    if args.json {
        print_json(&serde_json::Value::Array(notes_json(&notes)))
    } else {
        print_note_list(&notes, ctx.quiet());
        Ok(())
    }
}
