//! List command CLI wrapper
//!
//! Shows the catalog: sources, bundles with their membership, dangling
//! bundle references and orphaned output directories. Dangling references
//! are reported, never dropped.

use std::path::PathBuf;

use console::Style;

use crate::bundles;
use crate::catalog::Catalog;
use crate::cli::ListArgs;
use crate::error::Result;
use crate::operations::remove::outputs;

/// Run list command
pub fn run(
    config_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    args: ListArgs,
) -> Result<()> {
    let catalog = Catalog::open(config_dir, output_dir)?;
    let sources = catalog.sources()?;

    if args.orphans {
        return list_orphans(&catalog);
    }

    if sources.is_empty() {
        println!("No sources in the catalog.");
    } else {
        println!("Sources ({}):", sources.len());
        for source in &sources {
            let category = source
                .category
                .as_ref()
                .map(|c| format!("  [{}]", c))
                .unwrap_or_default();
            println!(
                "  {}{}",
                Style::new().bold().yellow().apply_to(&source.id),
                Style::new().dim().apply_to(&category)
            );
            if source.name != source.id {
                println!("      name: {}", source.name);
            }
            println!("      file: {}", source.path.display());
        }
    }

    let all_bundles = bundles::load_all(&catalog.bundles_dir)?;
    if !all_bundles.is_empty() {
        println!("\nBundles ({}):", all_bundles.len());
        for bundle in &all_bundles {
            let members = bundle.members();
            println!(
                "  {}  ({} source{})",
                Style::new().bold().apply_to(&bundle.id),
                members.len(),
                if members.len() == 1 { "" } else { "s" }
            );
            if let Some(description) = bundle.description() {
                println!("      {}", Style::new().dim().apply_to(&description));
            }
            for member in &members {
                println!("      - {}", member);
            }
        }
    }

    let known_ids: Vec<String> = sources.iter().map(|s| s.id.clone()).collect();
    let dangling = bundles::find_dangling(&catalog.bundles_dir, &known_ids)?;
    if !dangling.is_empty() {
        println!(
            "\n{}",
            Style::new()
                .yellow()
                .apply_to("Dangling references (member has no source record):")
        );
        for (bundle_id, member) in &dangling {
            println!("  {} -> {}", bundle_id, member);
        }
    }

    Ok(())
}

fn list_orphans(catalog: &Catalog) -> Result<()> {
    let sources = catalog.sources()?;
    let orphans = outputs::find_orphans(&catalog.output_dir, &sources);

    if orphans.is_empty() {
        println!("No orphaned output directories.");
        return Ok(());
    }

    println!("Orphaned output directories ({}):", orphans.len());
    for path in &orphans {
        println!("  {}", path.display());
    }

    Ok(())
}
