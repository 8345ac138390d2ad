//! Stats command CLI wrapper

use std::path::PathBuf;

use console::Style;

use crate::analytics::{AnalyticsStore, RecommendationConfig};
use crate::catalog::Catalog;
use crate::cli::StatsArgs;
use crate::error::{FeedsweepError, Result};

/// Run stats command
pub fn run(
    config_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    args: StatsArgs,
) -> Result<()> {
    let catalog = Catalog::open(config_dir, output_dir)?;
    let analytics = AnalyticsStore::new(&catalog.analytics_dir);
    let config = RecommendationConfig {
        stale_after_days: args.stale_after_days,
        min_success_rate: args.min_success_rate,
        min_samples: args.min_samples,
    };

    let source_ids: Vec<String> = catalog.sources()?.iter().map(|s| s.id.clone()).collect();

    if args.unused {
        let unused = analytics.get_unused_sources(&source_ids)?;
        if unused.is_empty() {
            println!("Every source has recorded fetch attempts.");
        } else {
            println!("Never-used sources ({}):", unused.len());
            for id in &unused {
                println!("  {}", id);
            }
        }
        return Ok(());
    }

    if args.low_success {
        let low = analytics.get_low_performing_sources(&source_ids, &config)?;
        if low.is_empty() {
            println!("No low-success sources.");
        } else {
            println!("Low-success sources ({}):", low.len());
            for id in &low {
                let stats = analytics.get_stats(id)?;
                println!(
                    "  {}  ({:.0}% over {} attempts)",
                    id,
                    stats.success_rate * 100.0,
                    stats.attempts
                );
            }
        }
        return Ok(());
    }

    if let Some(ref source_id) = args.source {
        return show_source(&catalog, &analytics, &config, source_id);
    }

    if source_ids.is_empty() {
        println!("No sources in the catalog.");
        return Ok(());
    }

    println!("Source health:");
    for id in &source_ids {
        let verdict = analytics.get_removal_recommendation(id, &config)?;
        let style = if verdict.is_removal_candidate() {
            Style::new().yellow()
        } else {
            Style::new().green()
        };
        println!(
            "  {:<24} {:<12} {}",
            id,
            style.apply_to(verdict.label()),
            Style::new().dim().apply_to(&verdict.evidence())
        );
    }

    Ok(())
}

fn show_source(
    catalog: &Catalog,
    analytics: &AnalyticsStore,
    config: &RecommendationConfig,
    source_id: &str,
) -> Result<()> {
    let record = catalog.get_source(source_id)?.ok_or_else(|| {
        FeedsweepError::SourceNotFound {
            id: source_id.to_string(),
        }
    })?;

    let stats = analytics.get_stats(source_id)?;
    let verdict = analytics.get_removal_recommendation(source_id, config)?;

    println!("{}", Style::new().bold().yellow().apply_to(&record.id));
    if record.name != record.id {
        println!("  name: {}", record.name);
    }
    if let Some(ref category) = record.category {
        println!("  category: {}", category);
    }
    println!("  attempts: {}", stats.attempts);
    println!("  successes: {}", stats.successes);
    if stats.attempts > 0 {
        println!("  success rate: {:.0}%", stats.success_rate * 100.0);
    }
    if let Some(days) = stats.days_since_last {
        println!("  last attempt: {} day(s) ago", days);
    }
    if let Some(days) = stats.days_since_first {
        println!("  tracked for: {} day(s)", days);
    }
    println!(
        "  verdict: {} ({})",
        Style::new().bold().apply_to(verdict.label()),
        verdict.evidence()
    );

    Ok(())
}
