use std::io::{self, IsTerminal, Read};

use notebox_core::{NewNote, Outcome, Request};

use crate::app::AppContext;
use crate::cli::NewArgs;
use crate::output::{note_json, print_json};

use super::unexpected;

pub async fn handle_new(ctx: &AppContext<'_>, args: &NewArgs) -> anyhow::Result<()> {
    let content = match &args.content {
        Some(value) => value.clone(),
        None => read_stdin_content()?,
    };
    let request = Request::Create(NewNote::new(
        args.title.clone().unwrap_or_default(),
        content,
    ));

    let note = match ctx.call(request).await? {
        Outcome::Note(note) => note,
        other => return Err(unexpected(other)),
    };

    if args.json {
        print_json(&note_json(&note))?;
    } else if ctx.quiet() {
        println!("{}", note.id);
    } else {
        println!("Created note {} ({})", note.id, note.title);
    }
    Ok(())
}

/// Piped input becomes the note body; an interactive terminal gives none.
fn read_stdin_content() -> anyhow::Result<String> {
    if io::stdin().is_terminal() {
        return Ok(String::new());
    }
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
    Ok(buffer.trim_end().to_string())
}
