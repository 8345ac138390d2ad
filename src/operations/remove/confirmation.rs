//! Confirmation dialog for the removal workflow
//!
//! Shows what a removal would touch before the user commits. Cancelling here
//! is the last exit: once the backup checkpoint is passed there is no
//! automatic rollback, only explicit restore.

use console::Style;
use inquire::Confirm;

use crate::common::format::format_size;
use crate::error::Result;

use super::TargetPlan;

/// Print the per-source removal plan
pub fn show_summary(plans: &[TargetPlan], purge_output: bool, no_backup: bool) {
    println!("\nThe following source(s) will be removed:");

    for plan in plans {
        let title = match &plan.record {
            Some(record) if record.name != plan.source_id => {
                format!("{} ({})", plan.source_id, record.name)
            }
            _ => plan.source_id.clone(),
        };
        let verdict = plan
            .recommendation
            .as_ref()
            .map(|r| format!("  [{}: {}]", r.label(), r.evidence()))
            .unwrap_or_default();
        println!(
            "  - {}{}",
            Style::new().bold().yellow().apply_to(&title),
            Style::new().dim().apply_to(&verdict)
        );

        match &plan.definition_path {
            Some(path) => println!("      definition: {}", path.display()),
            None => println!("      definition: (no backing file, treated as already deleted)"),
        }
        if !plan.bundles.is_empty() {
            println!("      bundles: {}", plan.bundles.join(", "));
        }
        if purge_output && !plan.outputs.is_empty() {
            let bytes: u64 = plan.outputs.iter().map(|o| o.bytes).sum();
            println!(
                "      output: {} director{}, {}",
                plan.outputs.len(),
                if plan.outputs.len() == 1 { "y" } else { "ies" },
                format_size(bytes)
            );
        }
    }

    println!();
    if no_backup {
        println!(
            "{}",
            Style::new()
                .red()
                .apply_to("Warning: --no-backup was given; this removal cannot be undone.")
        );
    } else {
        println!("A backup will be created before any deletion.");
    }
}

/// Ask the user to proceed
pub fn confirm_removal() -> Result<bool> {
    Ok(Confirm::new("Proceed with removal?")
        .with_default(false)
        .with_help_message("Press 'y' to confirm, Enter to cancel")
        .prompt()?)
}
