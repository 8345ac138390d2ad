//! Feedsweep - feed source catalog manager
//!
//! A command line tool for managing a catalog of feed source definitions
//! grouped into bundles, with safe, reversible removal of sources that are
//! no longer worth keeping.

use clap::Parser;

mod analytics;
mod backup;
mod bundles;
mod catalog;
mod cli;
mod commands;
mod common;
mod error;
mod operations;
mod progress;
mod ui;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Remove(args) => commands::remove::run(cli.config_dir, cli.output_dir, args),
        Commands::Restore(args) => commands::restore::run(cli.config_dir, cli.output_dir, args),
        Commands::Backups(args) => commands::backups::run(cli.config_dir, cli.output_dir, args),
        Commands::List(args) => commands::list::run(cli.config_dir, cli.output_dir, args),
        Commands::Stats(args) => commands::stats::run(cli.config_dir, cli.output_dir, args),
        Commands::Track(args) => commands::track::run(cli.config_dir, cli.output_dir, args),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        ui::show_error(&e.to_string());
        std::process::exit(1);
    }
}
