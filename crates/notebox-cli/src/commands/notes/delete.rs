use std::io::IsTerminal;

use notebox_core::{Outcome, Request};

use crate::app::AppContext;
use crate::cli::DeleteArgs;
use crate::errors::note_not_found;

use super::unexpected;

pub async fn handle_delete(ctx: &AppContext<'_>, args: &DeleteArgs) -> anyhow::Result<()> {
    if !args.yes && std::io::stdin().is_terminal() {
        let proceed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete note {}?", args.id))
            .default(false)
            .interact()?;
        if !proceed {
            return Err(anyhow::anyhow!("Delete cancelled"));
        }
    }

    match ctx.call(Request::Delete(args.id)).await? {
        Outcome::Deleted => {
            if !ctx.quiet() {
                println!("Deleted note {}", args.id);
            }
            Ok(())
        }
        Outcome::NotFound => Err(note_not_found(args.id).into()),
        other => Err(unexpected(other)),
    }
}
