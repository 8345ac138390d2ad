//! Remove command CLI wrapper
//!
//! This module provides the CLI interface for removal, delegating all
//! business logic to operations/remove.

use std::path::PathBuf;

use crate::catalog::Catalog;
use crate::cli::RemoveArgs;
use crate::error::Result;
use crate::operations::remove::{RemoveOperation, RemoveOptions};
use crate::ui;

/// Run remove command
pub fn run(
    config_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    args: RemoveArgs,
) -> Result<()> {
    let catalog = Catalog::open(config_dir, output_dir)?;

    let options = RemoveOptions {
        yes: args.yes,
        no_backup: args.no_backup,
        purge_output: args.purge_output,
        dry_run: args.dry_run,
        recommendation: Default::default(),
    };

    let operation = RemoveOperation::new(&catalog, options);
    let result = operation.execute(&args.sources)?;

    if !result.cancelled {
        ui::render_report(&result);
    }

    Ok(())
}
