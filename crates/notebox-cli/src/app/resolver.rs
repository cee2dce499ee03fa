//! Path resolution for config and store files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, default_store_path, read_config, NoteboxConfig};
use crate::constants::CONFIG_ENV;

/// Resolve the config file path, checking NOTEBOX_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Read the config file if one exists.
pub fn load_config() -> anyhow::Result<Option<NoteboxConfig>> {
    let config_path = resolve_config_path()?;
    if !config_path.exists() {
        return Ok(None);
    }
    read_config(&config_path).map(Some)
}

/// Resolve the store path from CLI args, then config, then the XDG default.
pub fn resolve_store_path(cli: &Cli, config: Option<&NoteboxConfig>) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.store.as_ref().filter(|p| !p.trim().is_empty()) {
        return Ok(PathBuf::from(path));
    }
    if let Some(config) = config {
        return Ok(PathBuf::from(&config.store.path));
    }
    default_store_path()
}

/// Error message when the store file is missing.
pub fn missing_store_message(path: &Path) -> String {
    format!(
        "No notes store found at {}\n\nRun:\n  notebox init\n\nOr specify a store path:\n  NOTEBOX_STORE=/path/to/notes.db notebox init",
        path.display()
    )
}
