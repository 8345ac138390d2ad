//! Interactive source selection for removal

use inquire::MultiSelect;

use crate::analytics::{AnalyticsStore, RecommendationConfig};
use crate::catalog::SourceRecord;
use crate::error::Result;

/// Select sources to remove from the catalog listing.
///
/// Items carry the recommendation label so removal candidates stand out.
/// Returns an empty selection when the user cancels (esc/q).
pub fn select_sources_interactively(
    sources: &[SourceRecord],
    analytics: &AnalyticsStore,
    config: &RecommendationConfig,
) -> Result<Vec<String>> {
    if sources.is_empty() {
        println!("No sources in the catalog.");
        return Ok(vec![]);
    }

    // Single-line items: "id (verdict)". Multi-line content breaks inquire's
    // list layout.
    let items: Vec<String> = sources
        .iter()
        .map(|source| {
            match analytics.get_removal_recommendation(&source.id, config) {
                Ok(verdict) => format!("{} ({})", source.id, verdict.label()),
                Err(_) => source.id.clone(),
            }
        })
        .collect();

    println!();

    let selection = match MultiSelect::new("Select sources to remove", items)
        .with_page_size(10)
        .with_help_message(
            "  ↑↓ navigate  space select  enter confirm  type to filter  q/esc cancel",
        )
        .prompt_skippable()?
    {
        Some(sel) => sel,
        None => return Ok(vec![]),
    };

    // Map display strings back to ids (id is the part before " (")
    let selected: Vec<String> = selection
        .iter()
        .map(|s| s.split(" (").next().unwrap_or(s).trim().to_string())
        .collect();

    Ok(selected)
}
