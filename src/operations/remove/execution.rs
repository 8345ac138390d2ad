//! Execution of the removal workflow's destructive steps
//!
//! Everything here runs after the backup checkpoint. Failures are collected
//! per source and converted into outcome tags: one source's failure never
//! blocks the others, and nothing is retried or rolled back.

use std::fs;
use std::path::Path;

use crate::analytics::AnalyticsStore;
use crate::backup::{BackupArtifact, BackupManager, CaptureInfo};
use crate::bundles;
use crate::catalog::Catalog;
use crate::common::fs::{canonicalize_with_fallback, collect_files};
use crate::error::{FeedsweepError, Result};
use crate::progress::ProgressDisplay;

use super::report::{SourceOutcome, SourceReport};
use super::TargetPlan;

/// Capture the backup checkpoint: every targeted definition, every affected
/// bundle record, and (when output purge was requested) every output file
/// that lives under the catalog root.
///
/// Output directories outside the catalog root cannot be expressed as
/// restorable relative paths; they are purged without capture, with a
/// warning.
pub fn capture_backup(
    catalog: &Catalog,
    manager: &BackupManager,
    plans: &[TargetPlan],
    purge_output: bool,
) -> Result<String> {
    let mut artifacts: Vec<BackupArtifact> = Vec::new();
    let mut bundle_ids: Vec<String> = Vec::new();

    for plan in plans {
        if let Some(path) = &plan.definition_path {
            artifacts.push(read_artifact(
                catalog,
                path,
                format!("source:{}", plan.source_id),
            )?);
        }
        for bundle_id in &plan.bundles {
            if !bundle_ids.contains(bundle_id) {
                bundle_ids.push(bundle_id.clone());
            }
        }
    }

    for bundle_id in &bundle_ids {
        let path = catalog.bundles_dir.join(format!("{}.yaml", bundle_id));
        artifacts.push(read_artifact(catalog, &path, format!("bundle:{}", bundle_id))?);
    }

    let mut includes_output = false;
    if purge_output {
        let root = canonicalize_with_fallback(&catalog.root);
        for plan in plans {
            for output in &plan.outputs {
                if !canonicalize_with_fallback(&output.path).starts_with(&root) {
                    eprintln!(
                        "Warning: {} is outside the catalog root and will be purged without backup",
                        output.path.display()
                    );
                    continue;
                }
                let files = collect_files(&output.path);
                let progress = ProgressDisplay::new(files.len() as u64);
                for (_, absolute) in &files {
                    progress.update(&absolute.display().to_string());
                    match read_artifact(catalog, absolute, format!("output:{}", plan.source_id)) {
                        Ok(artifact) => artifacts.push(artifact),
                        Err(e) => {
                            progress.abandon();
                            return Err(e);
                        }
                    }
                    includes_output = true;
                }
                progress.finish();
            }
        }
    }

    let info = CaptureInfo {
        sources: plans.iter().map(|p| p.source_id.clone()).collect(),
        bundles: bundle_ids,
        includes_output,
    };
    let manifest = manager.create_backup(&artifacts, info)?;
    Ok(manifest.backup_id)
}

fn read_artifact(catalog: &Catalog, path: &Path, name: String) -> Result<BackupArtifact> {
    let content = fs::read(path).map_err(|e| FeedsweepError::BackupCreationFailed {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;
    let relative_path = path
        .strip_prefix(&catalog.root)
        .map_err(|_| FeedsweepError::BackupCreationFailed {
            reason: format!("{} is not under the catalog root", path.display()),
        })?
        .to_path_buf();
    Ok(BackupArtifact {
        name,
        relative_path,
        content,
    })
}

/// Run the destructive steps for one source.
///
/// Deleting a definition that is already absent is a success, not an error;
/// the same goes for detaching a source no bundle lists. Sub-step failures
/// are folded into the outcome tag.
pub fn run_source(
    catalog: &Catalog,
    analytics: &AnalyticsStore,
    plan: &TargetPlan,
    purge_output: bool,
) -> SourceReport {
    if plan.missing {
        return SourceReport {
            source_id: plan.source_id.clone(),
            outcome: SourceOutcome::NotFound,
            detached_bundles: vec![],
            purged_dirs: 0,
            purged_bytes: 0,
        };
    }

    let mut errors: Vec<String> = Vec::new();
    let mut steps_completed = 0usize;

    // Detach from every bundle.
    let detached_bundles =
        match bundles::remove_source_from_all_bundles(&catalog.bundles_dir, &plan.source_id) {
            Ok(modified) => {
                steps_completed += 1;
                modified
            }
            Err(e) => {
                errors.push(format!("bundle detachment failed: {}", e));
                vec![]
            }
        };

    // Delete the definition via its actual extension, probed at execution
    // time. No match means it is already gone, which is fine.
    match catalog.resolve_definition_path(&plan.source_id) {
        Some(path) => match fs::remove_file(&path) {
            Ok(()) => steps_completed += 1,
            Err(e) => errors.push(format!("failed to delete {}: {}", path.display(), e)),
        },
        None => steps_completed += 1,
    }

    // Purge derived output and the fetch history with it.
    let mut purged_dirs = 0usize;
    let mut purged_bytes = 0u64;
    if purge_output {
        for output in &plan.outputs {
            match fs::remove_dir_all(&output.path) {
                Ok(()) => {
                    purged_dirs += 1;
                    purged_bytes += output.bytes;
                    steps_completed += 1;
                }
                Err(e) => {
                    errors.push(format!("failed to purge {}: {}", output.path.display(), e));
                }
            }
        }
        if let Err(e) = analytics.delete_history(&plan.source_id) {
            errors.push(format!("failed to delete fetch history: {}", e));
        } else {
            steps_completed += 1;
        }
    }

    let outcome = if errors.is_empty() {
        SourceOutcome::Removed
    } else if steps_completed > 0 {
        SourceOutcome::PartiallyRemoved { detail: errors }
    } else {
        SourceOutcome::Failed {
            reason: errors.join("; "),
        }
    };

    SourceReport {
        source_id: plan.source_id.clone(),
        outcome,
        detached_bundles,
        purged_dirs,
        purged_bytes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::remove::outputs::OutputDir;
    use tempfile::TempDir;

    fn catalog_in(temp: &TempDir) -> Catalog {
        Catalog::open(Some(temp.path().to_path_buf()), None).unwrap()
    }

    fn plan(source_id: &str, catalog: &Catalog) -> TargetPlan {
        TargetPlan {
            source_id: source_id.to_string(),
            record: None,
            definition_path: catalog.resolve_definition_path(source_id),
            bundles: vec![],
            outputs: vec![],
            recommendation: None,
            missing: false,
        }
    }

    #[test]
    fn test_run_source_deletes_via_actual_extension() {
        let temp = TempDir::new().unwrap();
        let catalog = catalog_in(&temp);
        fs::create_dir_all(&catalog.sources_dir).unwrap();
        fs::write(catalog.sources_dir.join("techcrunch.yml"), "name: TechCrunch\n").unwrap();

        let analytics = AnalyticsStore::new(&catalog.analytics_dir);
        let report = run_source(&catalog, &analytics, &plan("techcrunch", &catalog), false);

        assert_eq!(report.outcome, SourceOutcome::Removed);
        assert!(!catalog.sources_dir.join("techcrunch.yml").exists());
    }

    #[test]
    fn test_run_source_absent_definition_is_success() {
        let temp = TempDir::new().unwrap();
        let catalog = catalog_in(&temp);
        let analytics = AnalyticsStore::new(&catalog.analytics_dir);

        let report = run_source(&catalog, &analytics, &plan("ghost", &catalog), false);
        assert_eq!(report.outcome, SourceOutcome::Removed);
    }

    #[test]
    fn test_run_source_detaches_bundles() {
        let temp = TempDir::new().unwrap();
        let catalog = catalog_in(&temp);
        fs::create_dir_all(&catalog.bundles_dir).unwrap();
        fs::write(
            catalog.bundles_dir.join("tech.yaml"),
            "sources:\n  - gizmodo\n  - ars\n",
        )
        .unwrap();

        let analytics = AnalyticsStore::new(&catalog.analytics_dir);
        let report = run_source(&catalog, &analytics, &plan("gizmodo", &catalog), false);

        assert_eq!(report.outcome, SourceOutcome::Removed);
        assert_eq!(report.detached_bundles, vec!["tech"]);
    }

    #[test]
    fn test_run_source_purges_output_and_history() {
        let temp = TempDir::new().unwrap();
        let catalog = catalog_in(&temp);
        let out = catalog.output_dir.join("gizmodo-2026-08-01");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("index.html"), b"12345").unwrap();

        let analytics = AnalyticsStore::new(&catalog.analytics_dir);
        analytics.record_fetch("gizmodo", true, None).unwrap();

        let mut plan = plan("gizmodo", &catalog);
        plan.outputs = vec![OutputDir {
            path: out.clone(),
            bytes: 5,
        }];

        let report = run_source(&catalog, &analytics, &plan, true);
        assert_eq!(report.outcome, SourceOutcome::Removed);
        assert_eq!(report.purged_dirs, 1);
        assert_eq!(report.purged_bytes, 5);
        assert!(!out.exists());
        assert_eq!(analytics.get_stats("gizmodo").unwrap().attempts, 0);
    }

    #[test]
    fn test_run_source_partial_when_definition_delete_fails() {
        let temp = TempDir::new().unwrap();
        let catalog = catalog_in(&temp);
        // The definition path is occupied by a directory, so the unlink
        // fails; the detachment still goes through.
        fs::create_dir_all(catalog.sources_dir.join("gizmodo.yaml")).unwrap();
        fs::write(
            catalog.sources_dir.join("gizmodo.yaml/stray.txt"),
            "not a definition",
        )
        .unwrap();
        fs::create_dir_all(&catalog.bundles_dir).unwrap();
        fs::write(
            catalog.bundles_dir.join("tech.yaml"),
            "sources:\n  - gizmodo\n",
        )
        .unwrap();

        let analytics = AnalyticsStore::new(&catalog.analytics_dir);
        let report = run_source(&catalog, &analytics, &plan("gizmodo", &catalog), false);

        assert!(matches!(
            report.outcome,
            SourceOutcome::PartiallyRemoved { .. }
        ));
        assert_eq!(report.detached_bundles, vec!["tech"]);
    }

    #[test]
    fn test_capture_backup_includes_definitions_and_bundles() {
        let temp = TempDir::new().unwrap();
        let catalog = catalog_in(&temp);
        fs::create_dir_all(&catalog.sources_dir).unwrap();
        fs::write(catalog.sources_dir.join("gizmodo.yaml"), "name: Gizmodo\n").unwrap();
        fs::create_dir_all(&catalog.bundles_dir).unwrap();
        fs::write(
            catalog.bundles_dir.join("tech.yaml"),
            "sources:\n  - gizmodo\n",
        )
        .unwrap();

        let manager = BackupManager::new(&catalog.backups_dir, &catalog.root);
        let mut target = plan("gizmodo", &catalog);
        target.bundles = vec!["tech".to_string()];

        let backup_id = capture_backup(&catalog, &manager, &[target], false).unwrap();
        let manifest = manager.load_manifest(&backup_id).unwrap();
        assert_eq!(manifest.artifacts.len(), 2);
        assert_eq!(manifest.sources, vec!["gizmodo"]);
        assert_eq!(manifest.bundles, vec!["tech"]);
        assert!(!manifest.includes_output);
    }
}
