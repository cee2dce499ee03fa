use notebox_core::{NoteUpdate, Request};

use crate::app::AppContext;
use crate::cli::EditArgs;
use crate::errors::CliError;
use crate::output::{note_json, print_json};

use super::expect_note;

pub async fn handle_edit(ctx: &AppContext<'_>, args: &EditArgs) -> anyhow::Result<()> {
    if args.title.is_none() && args.content.is_none() {
        return Err(CliError::invalid_input(
            "Nothing to change\nHint: Pass --title and/or --content.",
        )
        .into());
    }

    let current = expect_note(ctx.call(Request::Get(args.id)).await?, args.id)?;
    let update = NoteUpdate::new(
        args.id,
        args.title.clone().unwrap_or(current.title),
        args.content.clone().unwrap_or(current.content),
    );
    let note = expect_note(ctx.call(Request::Update(update)).await?, args.id)?;

    if args.json {
        print_json(&note_json(&note))?;
    } else if !ctx.quiet() {
        println!("Updated note {}", note.id);
    }
    Ok(())
}
