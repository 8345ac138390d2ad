//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - remove: Remove command arguments
//! - restore: Restore command arguments
//! - backups: Backups command arguments
//! - list: List command arguments
//! - stats: Stats command arguments
//! - track: Track command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod backups;
pub mod completions;
pub mod list;
pub mod remove;
pub mod restore;
pub mod stats;
pub mod track;

pub use backups::{BackupsArgs, BackupsSubcommand, CleanupArgs};
pub use completions::CompletionsArgs;
pub use list::ListArgs;
pub use remove::RemoveArgs;
pub use restore::RestoreArgs;
pub use stats::StatsArgs;
pub use track::TrackArgs;

/// Feedsweep - feed source catalog manager
///
/// Manage a catalog of feed sources and remove the ones that stopped earning
/// their keep, safely and reversibly.
#[derive(Parser, Debug)]
#[command(
    name = "feedsweep",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Catalog manager for feed sources with safe, reversible removal",
    long_about = "Feedsweep manages feed source definitions grouped into bundles. Removing a \
                  source deletes its definition, detaches it from every bundle and optionally \
                  purges its fetched output, always behind a restorable backup.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  feedsweep remove gizmodo             \x1b[90m# Remove one source\x1b[0m\n   \
                  feedsweep remove                     \x1b[90m# Pick sources interactively\x1b[0m\n   \
                  feedsweep restore                    \x1b[90m# Undo the latest removal\x1b[0m\n   \
                  feedsweep stats --unused             \x1b[90m# Sources never fetched\x1b[0m\n   \
                  feedsweep backups cleanup --retain 5 \x1b[90m# Trim old backups\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Configuration directory (defaults to the user config dir)
    #[arg(long, short = 'c', global = true, env = "FEEDSWEEP_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Derived output directory (defaults to <config-dir>/output)
    #[arg(long, global = true, env = "FEEDSWEEP_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Remove sources from the catalog
    Remove(RemoveArgs),

    /// Restore a backup taken before a removal
    Restore(RestoreArgs),

    /// Manage removal backups
    #[command(name = "backups")]
    Backups(BackupsArgs),

    /// List sources, bundles and dangling references
    List(ListArgs),

    /// Show fetch statistics and removal recommendations
    Stats(StatsArgs),

    /// Record a fetch outcome (called by the fetcher after each attempt)
    Track(TrackArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
