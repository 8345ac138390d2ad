//! Backups command CLI wrapper

use std::path::PathBuf;

use crate::backup::{BackupManager, RetentionPolicy};
use crate::catalog::Catalog;
use crate::cli::{BackupsArgs, BackupsSubcommand, CleanupArgs};
use crate::common::format::format_size;
use crate::error::Result;

/// Run backups command
pub fn run(
    config_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    args: BackupsArgs,
) -> Result<()> {
    let catalog = Catalog::open(config_dir, output_dir)?;
    let manager = BackupManager::new(&catalog.backups_dir, &catalog.root);

    match args.command {
        None | Some(BackupsSubcommand::List) => list_backups(&manager),
        Some(BackupsSubcommand::Delete(delete_args)) => {
            manager.delete_backup(&delete_args.backup_id)?;
            println!("Deleted backup: {}", delete_args.backup_id);
            Ok(())
        }
        Some(BackupsSubcommand::Cleanup(cleanup_args)) => cleanup(&manager, cleanup_args),
    }
}

fn list_backups(manager: &BackupManager) -> Result<()> {
    let summaries = manager.list_backups()?;

    if summaries.is_empty() {
        println!("No backups stored.");
        return Ok(());
    }

    println!("Backups ({}):", summaries.len());
    for summary in &summaries {
        println!(
            "  {}  {}  {} artifact{}, {}",
            summary.id,
            summary.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
            summary.artifact_count,
            if summary.artifact_count == 1 { "" } else { "s" },
            format_size(summary.total_bytes)
        );
    }
    println!("\nRun 'feedsweep restore <id>' to restore one.");

    Ok(())
}

fn cleanup(manager: &BackupManager, args: CleanupArgs) -> Result<()> {
    // clap guarantees exactly one policy flag is present.
    let policy = if let Some(count) = args.retain {
        RetentionPolicy::KeepCount(count)
    } else if let Some(days) = args.max_age_days {
        RetentionPolicy::MaxAgeDays(days)
    } else {
        return Ok(());
    };

    let deleted = manager.cleanup_old_backups(policy)?;
    if deleted.is_empty() {
        println!("Nothing to clean up.");
    } else {
        println!("Deleted {} backup(s):", deleted.len());
        for id in &deleted {
            println!("  {}", id);
        }
    }

    Ok(())
}
