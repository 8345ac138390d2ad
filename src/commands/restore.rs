//! Restore command CLI wrapper

use std::path::PathBuf;

use crate::backup::BackupManager;
use crate::catalog::Catalog;
use crate::cli::RestoreArgs;
use crate::error::{FeedsweepError, Result};

/// Run restore command
///
/// Restores the named backup, or the most recent one when no id was given.
/// The backup is kept afterwards; restores are repeatable.
pub fn run(
    config_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    args: RestoreArgs,
) -> Result<()> {
    let catalog = Catalog::open(config_dir, output_dir)?;
    let manager = BackupManager::new(&catalog.backups_dir, &catalog.root);

    let backup_id = match args.backup_id {
        Some(id) => id,
        None => match manager.list_backups()?.first() {
            Some(summary) => summary.id.clone(),
            None => {
                return Err(FeedsweepError::BackupNotFound {
                    id: "(no backups stored)".to_string(),
                });
            }
        },
    };

    let restored = manager.restore_backup(&backup_id)?;
    println!(
        "Restored {} artifact{} from backup {}.",
        restored,
        if restored == 1 { "" } else { "s" },
        backup_id
    );

    Ok(())
}
