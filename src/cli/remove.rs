use clap::Parser;

/// Arguments for the remove command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Remove a source:\n    feedsweep remove gizmodo\n\n\
                  Remove without confirmation:\n    feedsweep remove gizmodo -y\n\n\
                  Remove several sources at once:\n    feedsweep remove gizmodo techcrunch\n\n\
                  Also purge fetched output:\n    feedsweep remove gizmodo --purge-output\n\n\
                  Select sources interactively:\n    feedsweep remove")]
pub struct RemoveArgs {
    /// Source ids to remove (if omitted, shows an interactive menu)
    pub sources: Vec<String>,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Skip the backup taken before deletion (cannot be undone)
    #[arg(long = "no-backup")]
    pub no_backup: bool,

    /// Also purge derived output directories and fetch history
    #[arg(long = "purge-output")]
    pub purge_output: bool,

    /// Show what would be removed without actually removing
    #[arg(long)]
    pub dry_run: bool,
}
