use clap::{ArgGroup, Parser};

/// Arguments for the track command
#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("outcome").required(true).args(["success", "failure"])))]
#[command(after_help = "EXAMPLES:\n  \
                  Record a successful fetch:\n    feedsweep track gizmodo --success\n\n\
                  Record a failed fetch with a classification:\n    feedsweep track gizmodo --failure --error-kind timeout")]
pub struct TrackArgs {
    /// Source id the fetch attempt was for
    pub source: String,

    /// The fetch succeeded
    #[arg(long)]
    pub success: bool,

    /// The fetch failed
    #[arg(long)]
    pub failure: bool,

    /// Error classification for a failed fetch (e.g. timeout, parse)
    #[arg(long = "error-kind", requires = "failure")]
    pub error_kind: Option<String>,
}
