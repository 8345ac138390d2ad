use clap::Parser;

/// Arguments for the stats command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Verdicts for every source:\n    feedsweep stats\n\n\
                  Details for one source:\n    feedsweep stats gizmodo\n\n\
                  Sources never fetched:\n    feedsweep stats --unused\n\n\
                  Sources mostly failing:\n    feedsweep stats --low-success")]
pub struct StatsArgs {
    /// Source id to inspect (if omitted, shows every source)
    pub source: Option<String>,

    /// Show only sources with zero recorded fetch attempts
    #[arg(long, conflicts_with_all = ["source", "low_success"])]
    pub unused: bool,

    /// Show only sources with a low success rate
    #[arg(long = "low-success", conflicts_with = "source")]
    pub low_success: bool,

    /// Days without activity before a source counts as stale
    #[arg(long = "stale-after", default_value_t = 60)]
    pub stale_after_days: i64,

    /// Success rate under which a source counts as low-success
    #[arg(long = "min-success-rate", default_value_t = 0.3)]
    pub min_success_rate: f64,

    /// Attempts required before the success rate is judged
    #[arg(long = "min-samples", default_value_t = 5)]
    pub min_samples: usize,
}
