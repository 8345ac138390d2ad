use clap::Parser;

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List the whole catalog:\n    feedsweep list\n\n\
                  List only orphaned output directories:\n    feedsweep list --orphans")]
pub struct ListArgs {
    /// Show only derived-output directories no known source claims
    #[arg(long)]
    pub orphans: bool,
}
