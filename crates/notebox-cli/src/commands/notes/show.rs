use notebox_core::Request;

use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::output::{note_json, print_json, print_note};

use super::expect_note;

pub async fn handle_show(ctx: &AppContext<'_>, args: &ShowArgs) -> anyhow::Result<()> {
    let note = expect_note(ctx.call(Request::Get(args.id)).await?, args.id)?;
    if args.json {
        print_json(&note_json(&note))
    } else {
        print_note(&note, ctx.quiet());
        Ok(())
    }
}
