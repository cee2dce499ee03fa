use std::io::IsTerminal;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use notebox_core::fs::rename_with_fallback;

use crate::app::AppContext;
use crate::cli::BackupArgs;

pub fn handle_backup(ctx: &AppContext, args: &BackupArgs) -> anyhow::Result<()> {
    let source = ctx.existing_store_path()?;
    let destination = Path::new(&args.destination);
    if destination == source.as_path() {
        return Err(anyhow::anyhow!(
            "Backup destination is the notes store itself: {}",
            source.display()
        ));
    }
    if std::io::stdin().is_terminal() && !ctx.quiet() {
        let proceed = dialoguer::Confirm::new()
            .with_prompt(format!("Back up notes to {}?", args.destination))
            .default(true)
            .interact()?;
        if !proceed {
            return Err(anyhow::anyhow!("Backup cancelled"));
        }
    }
    let count = backup_atomic_copy(&source, destination)?;
    if count == 0 {
        return Err(anyhow::anyhow!("Backup failed: zero bytes written"));
    }
    if !ctx.quiet() {
        println!("Backed up notes to {}", args.destination);
    }
    Ok(())
}

fn backup_atomic_copy(source: &Path, destination: &Path) -> anyhow::Result<u64> {
    let parent = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| {
        anyhow::anyhow!(
            "Failed to create backup directory {}: {}",
            parent.display(),
            e
        )
    })?;

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| anyhow::anyhow!("System time error: {}", e))?
        .as_nanos();
    let temp_path = parent.join(format!(".notebox-backup-{}.tmp", nanos));

    let bytes = std::fs::copy(source, &temp_path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to copy notes from {} to {}: {}",
            source.display(),
            destination.display(),
            e
        )
    })?;

    rename_with_fallback(&temp_path, destination).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        anyhow::anyhow!("Failed to move backup into place: {}", e)
    })?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_copy_replaces_destination() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("notes.db");
        let destination = dir.path().join("nested").join("copy.db");
        std::fs::write(&source, b"current").unwrap();
        std::fs::create_dir_all(destination.parent().unwrap()).unwrap();
        std::fs::write(&destination, b"stale backup").unwrap();

        let bytes = backup_atomic_copy(&source, &destination).unwrap();

        assert_eq!(bytes, 7);
        assert_eq!(std::fs::read(&destination).unwrap(), b"current");
        let leftovers: Vec<_> = std::fs::read_dir(destination.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
