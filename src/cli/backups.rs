use clap::{ArgGroup, Parser, Subcommand};

/// Arguments for the backups command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List backups:\n    feedsweep backups\n\n\
                  Delete a backup:\n    feedsweep backups delete 20260807_142530_123456\n\n\
                  Keep only the newest five:\n    feedsweep backups cleanup --retain 5\n\n\
                  Drop backups older than a month:\n    feedsweep backups cleanup --max-age-days 30")]
pub struct BackupsArgs {
    #[command(subcommand)]
    pub command: Option<BackupsSubcommand>,
}

/// Backups subcommands
#[derive(Subcommand, Debug)]
pub enum BackupsSubcommand {
    /// List stored backups, newest first
    List,

    /// Delete a backup by id
    Delete(DeleteBackupArgs),

    /// Delete old backups beyond a retention policy
    Cleanup(CleanupArgs),
}

/// Arguments for backups delete
#[derive(Parser, Debug)]
pub struct DeleteBackupArgs {
    /// Backup id to delete
    pub backup_id: String,
}

/// Arguments for backups cleanup
#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("policy").required(true).args(["retain", "max_age_days"])))]
pub struct CleanupArgs {
    /// Keep only the newest N backups
    #[arg(long)]
    pub retain: Option<usize>,

    /// Keep only backups newer than N days (the newest always survives)
    #[arg(long = "max-age-days")]
    pub max_age_days: Option<i64>,
}
