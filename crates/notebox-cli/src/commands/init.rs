use std::path::PathBuf;

use notebox_core::{NoteRepository, SqliteNoteStore};

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_store_path, write_config, NoteboxConfig};
use crate::errors::CliError;

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let store_path = match args.path.clone().or_else(|| ctx.cli().store.clone()) {
        Some(value) => PathBuf::from(value),
        None => default_store_path()?,
    };
    let config_path = match &args.config_path {
        Some(value) => PathBuf::from(value),
        None => resolve_config_path()?,
    };

    if store_path.exists() {
        return Err(CliError::invalid_input(format!(
            "Notes store already exists: {}\nHint: Use --store to pick another location.",
            store_path.display()
        ))
        .into());
    }

    let store = SqliteNoteStore::open(&store_path)?;
    store.close()?;

    write_config(&config_path, &NoteboxConfig::new(store_path.clone()))?;

    if !ctx.quiet() {
        println!("status=ok");
        println!("store_path={}", store_path.display());
        println!("config_path={}", config_path.display());
    }
    Ok(())
}
