use notebox_core::{NoteRepository, SqliteNoteStore};

use crate::app::AppContext;
use crate::errors::CliError;

/// Open the store directly and verify every row, bypassing the bridge.
pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let path = ctx.existing_store_path()?;
    let store = SqliteNoteStore::open(&path).map_err(|err| {
        CliError::integrity_failed(
            format!("Integrity check failed: {}", err),
            "Hint: The store file was left untouched. Restore it from a backup.",
        )
    })?;

    let result = store.check_integrity().and_then(|()| store.count());
    match result {
        Ok(count) => {
            store.close()?;
            if !ctx.quiet() {
                println!("check=integrity ok");
                println!("notes={}", count);
                println!("status=ok");
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("status=failed");
            Err(CliError::integrity_failed(
                format!("Integrity check failed: {}", err),
                "Hint: Restore the store from a copy made with `notebox backup`.",
            )
            .into())
        }
    }
}
