//! Removal workflow
//!
//! Sequences one removal invocation: resolve the requested sources, show the
//! plan, confirm, create the backup checkpoint, then detach bundles, delete
//! definitions and optionally purge derived output, per source and
//! independently. Cancellation is honored only before the checkpoint; after
//! it, failures become outcome tags in the report and recovery is an
//! explicit restore.

pub mod confirmation;
pub mod execution;
pub mod outputs;
pub mod report;
pub mod selection;

use std::path::PathBuf;

use crate::analytics::{AnalyticsStore, Recommendation, RecommendationConfig};
use crate::backup::BackupManager;
use crate::bundles;
use crate::catalog::{Catalog, SourceRecord};
use crate::error::{FeedsweepError, Result};
use crate::ui;

pub use report::{RemovalResult, SourceOutcome, SourceReport};

use outputs::OutputDir;

/// Configuration options for removal
#[derive(Debug, Clone, Default)]
pub struct RemoveOptions {
    /// Skip the confirmation prompt
    pub yes: bool,
    /// Skip the backup checkpoint (explicit operator opt-out)
    pub no_backup: bool,
    /// Also purge derived output directories and the fetch history
    pub purge_output: bool,
    /// Show the plan without mutating anything
    pub dry_run: bool,
    /// Thresholds for the recommendation shown next to each source
    pub recommendation: RecommendationConfig,
}

/// Everything known about one requested source before execution
#[derive(Debug, Clone)]
pub struct TargetPlan {
    pub source_id: String,
    pub record: Option<SourceRecord>,
    /// Existing definition file, probed across the supported extensions
    pub definition_path: Option<PathBuf>,
    /// Bundles currently listing this source
    pub bundles: Vec<String>,
    /// Correlated derived-output directories
    pub outputs: Vec<OutputDir>,
    pub recommendation: Option<Recommendation>,
    /// The id matched nothing anywhere; reported as not-found
    pub missing: bool,
}

/// High-level removal operation
pub struct RemoveOperation<'a> {
    catalog: &'a Catalog,
    analytics: AnalyticsStore,
    backups: BackupManager,
    options: RemoveOptions,
}

impl<'a> RemoveOperation<'a> {
    pub fn new(catalog: &'a Catalog, options: RemoveOptions) -> Self {
        Self {
            analytics: AnalyticsStore::new(&catalog.analytics_dir),
            backups: BackupManager::new(&catalog.backups_dir, &catalog.root),
            catalog,
            options,
        }
    }

    /// Run the workflow for the requested ids, or interactively when none
    /// were given. Returns the structured per-source report.
    pub fn execute(&self, requested: &[String]) -> Result<RemovalResult> {
        let available = self.catalog.sources()?;

        let ids = if requested.is_empty() {
            if self.options.yes {
                // Nothing to prompt for and nothing named.
                return Err(FeedsweepError::EmptySelection);
            }
            selection::select_sources_interactively(
                &available,
                &self.analytics,
                &self.options.recommendation,
            )?
        } else {
            dedup_preserving_order(requested)
        };

        if ids.is_empty() {
            ui::show_info("Removal cancelled.");
            return Ok(RemovalResult::cancelled());
        }

        let plans: Vec<TargetPlan> = ids
            .iter()
            .map(|id| self.build_plan(id, &available))
            .collect::<Result<_>>()?;

        let actionable: Vec<TargetPlan> = plans.iter().filter(|p| !p.missing).cloned().collect();
        if actionable.is_empty() {
            // Every id matched nothing; report not-found outcomes without
            // prompting or checkpointing.
            return Ok(self.run_all(&plans, None));
        }

        confirmation::show_summary(&actionable, self.options.purge_output, self.options.no_backup);

        if self.options.dry_run {
            ui::show_info("Dry run: no changes were made.");
            return Ok(RemovalResult::cancelled());
        }

        if !self.options.yes && !confirmation::confirm_removal()? {
            ui::show_info("Removal cancelled.");
            return Ok(RemovalResult::cancelled());
        }

        // The checkpoint. A failure here aborts the whole invocation before
        // anything is deleted.
        let backup_id = if self.options.no_backup {
            None
        } else {
            Some(execution::capture_backup(
                self.catalog,
                &self.backups,
                &actionable,
                self.options.purge_output,
            )?)
        };

        let result = self.run_all(&plans, backup_id);
        self.catalog.invalidate();
        Ok(result)
    }

    fn run_all(&self, plans: &[TargetPlan], backup_id: Option<String>) -> RemovalResult {
        let mut result = RemovalResult {
            cancelled: false,
            backup_id,
            reports: Vec::with_capacity(plans.len()),
        };
        for plan in plans {
            result.reports.push(execution::run_source(
                self.catalog,
                &self.analytics,
                plan,
                self.options.purge_output,
            ));
        }
        result
    }

    fn build_plan(&self, source_id: &str, available: &[SourceRecord]) -> Result<TargetPlan> {
        let record = available.iter().find(|s| s.id == source_id).cloned();
        let definition_path = self.catalog.resolve_definition_path(source_id);
        let bundle_ids = bundles::bundles_containing(&self.catalog.bundles_dir, source_id)?;
        let output_dirs = outputs::discover(
            &self.catalog.output_dir,
            source_id,
            record.as_ref().map(|r| r.name.as_str()),
        );
        let attempts = self.analytics.get_stats(source_id)?.attempts;

        let missing = record.is_none()
            && definition_path.is_none()
            && bundle_ids.is_empty()
            && output_dirs.is_empty()
            && attempts == 0;

        let recommendation = if missing {
            None
        } else {
            Some(
                self.analytics
                    .get_removal_recommendation(source_id, &self.options.recommendation)?,
            )
        };

        Ok(TargetPlan {
            source_id: source_id.to_string(),
            record,
            definition_path,
            bundles: bundle_ids,
            outputs: output_dirs,
            recommendation,
            missing,
        })
    }
}

fn dedup_preserving_order(ids: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    for id in ids {
        if !seen.contains(id) {
            seen.push(id.clone());
        }
    }
    seen
}
