//! Track command CLI wrapper
//!
//! The push interface for the external fetcher: one invocation records one
//! fetch outcome.

use std::path::PathBuf;

use crate::analytics::AnalyticsStore;
use crate::catalog::Catalog;
use crate::cli::TrackArgs;
use crate::error::Result;

/// Run track command
pub fn run(
    config_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    args: TrackArgs,
) -> Result<()> {
    let catalog = Catalog::open(config_dir, output_dir)?;
    let analytics = AnalyticsStore::new(&catalog.analytics_dir);

    let success = args.success && !args.failure;
    analytics.record_fetch(&args.source, success, args.error_kind.as_deref())?;

    let stats = analytics.get_stats(&args.source)?;
    println!(
        "Recorded {} for '{}' ({} attempt{} tracked).",
        if success { "success" } else { "failure" },
        args.source,
        stats.attempts,
        if stats.attempts == 1 { "" } else { "s" }
    );

    Ok(())
}
