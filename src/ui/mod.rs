//! Console display helpers
//!
//! All user-facing rendering lives here: the removal report, informational
//! and error lines. Prompting lives next to the workflow that owns it.

use console::Style;

use crate::common::format::format_size;
use crate::operations::remove::{RemovalResult, SourceOutcome};

/// Print an informational message
pub fn show_info(message: &str) {
    println!("{}", message);
}

/// Print an error message to stderr
pub fn show_error(message: &str) {
    eprintln!("{} {}", Style::new().bold().red().apply_to("Error:"), message);
}

fn outcome_style(outcome: &SourceOutcome) -> Style {
    match outcome {
        SourceOutcome::Removed => Style::new().green(),
        SourceOutcome::NotFound => Style::new().dim(),
        SourceOutcome::PartiallyRemoved { .. } => Style::new().yellow(),
        SourceOutcome::Failed { .. } => Style::new().red(),
    }
}

/// Print the structured removal report: one line per requested source, the
/// purge totals, and the restore reference for the backup that was taken.
pub fn render_report(result: &RemovalResult) {
    println!("\nRemoval report:");

    for report in &result.reports {
        let style = outcome_style(&report.outcome);
        let detached = if report.detached_bundles.is_empty() {
            String::new()
        } else {
            format!("  (detached from: {})", report.detached_bundles.join(", "))
        };
        println!(
            "  {:<24} {}{}",
            report.source_id,
            style.apply_to(report.outcome.label()),
            Style::new().dim().apply_to(&detached)
        );

        match &report.outcome {
            SourceOutcome::PartiallyRemoved { detail } => {
                for line in detail {
                    println!("      - {}", line);
                }
            }
            SourceOutcome::Failed { reason } => {
                println!("      - {}", reason);
            }
            _ => {}
        }
    }

    let purged_dirs = result.purged_dirs();
    if purged_dirs > 0 {
        println!(
            "\nPurged {} output director{} ({}).",
            purged_dirs,
            if purged_dirs == 1 { "y" } else { "ies" },
            format_size(result.purged_bytes())
        );
    }

    if let Some(ref backup_id) = result.backup_id {
        println!("\nBackup: {}", backup_id);
        println!("Undo with 'feedsweep restore {}'.", backup_id);
    } else if result.has_failures() {
        println!(
            "\n{}",
            Style::new()
                .yellow()
                .apply_to("No backup was taken for this removal.")
        );
    }
}
