use clap::Parser;

/// Arguments for the restore command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Restore the most recent backup:\n    feedsweep restore\n\n\
                  Restore a specific backup:\n    feedsweep restore 20260807_142530_123456")]
pub struct RestoreArgs {
    /// Backup id to restore (if omitted, restores the most recent backup)
    pub backup_id: Option<String>,
}
