//! Backup units: create, list, restore, delete
//!
//! A backup unit is an immutable snapshot of the artifacts a removal is
//! about to touch, captured as one atomic set: a single removal may span one
//! definition, several bundle records, and many output files, and they must
//! be restorable together. Creation is all-or-nothing: artifacts are staged
//! into a temporary directory inside the backups root and renamed into place,
//! so a failed creation leaves no partial backup directory behind.

pub mod manifest;
pub mod retention;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::{FeedsweepError, Result};

pub use manifest::{ArtifactEntry, BackupManifest, MANIFEST_FILE};
pub use retention::RetentionPolicy;

/// An artifact handed to [`BackupManager::create_backup`]
#[derive(Debug, Clone)]
pub struct BackupArtifact {
    /// Logical name for the manifest, e.g. "source:gizmodo"
    pub name: String,
    /// Path relative to the restore root
    pub relative_path: PathBuf,
    /// Content at capture time
    pub content: Vec<u8>,
}

/// Summary of one stored backup unit
#[derive(Debug, Clone)]
pub struct BackupSummary {
    pub id: String,
    pub created_at: chrono::DateTime<Utc>,
    pub artifact_count: usize,
    pub total_bytes: u64,
}

/// Extra manifest metadata describing what a capture was for
#[derive(Debug, Clone, Default)]
pub struct CaptureInfo {
    pub sources: Vec<String>,
    pub bundles: Vec<String>,
    pub includes_output: bool,
}

/// Manages the backups directory and restores into the catalog root
#[derive(Debug)]
pub struct BackupManager {
    backups_dir: PathBuf,
    restore_root: PathBuf,
}

impl BackupManager {
    pub fn new(backups_dir: impl Into<PathBuf>, restore_root: impl Into<PathBuf>) -> Self {
        Self {
            backups_dir: backups_dir.into(),
            restore_root: restore_root.into(),
        }
    }

    /// Create a backup unit capturing `artifacts`.
    ///
    /// The id is derived from the wall clock with microsecond resolution, so
    /// backups created within the same second do not collide; an existing
    /// directory with the same stamp is re-probed until a free id is found.
    pub fn create_backup(
        &self,
        artifacts: &[BackupArtifact],
        info: CaptureInfo,
    ) -> Result<BackupManifest> {
        fs::create_dir_all(&self.backups_dir).map_err(|e| creation_failed(&self.backups_dir, e))?;

        let staging = tempfile::Builder::new()
            .prefix(".staging-")
            .tempdir_in(&self.backups_dir)
            .map_err(|e| creation_failed(&self.backups_dir, e))?;

        let mut entries = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            let dest = staging.path().join(&artifact.relative_path);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent).map_err(|e| creation_failed(parent, e))?;
            }
            fs::write(&dest, &artifact.content).map_err(|e| creation_failed(&dest, e))?;

            entries.push(ArtifactEntry {
                name: artifact.name.clone(),
                path: artifact.relative_path.to_string_lossy().replace('\\', "/"),
                bytes: artifact.content.len() as u64,
                blake3: blake3::hash(&artifact.content).to_hex().to_string(),
            });
        }

        let (backup_id, final_dir) = self.claim_backup_id();
        let manifest = BackupManifest {
            backup_id,
            created_at: Utc::now(),
            sources: info.sources,
            bundles: info.bundles,
            includes_output: info.includes_output,
            artifacts: entries,
        };

        let manifest_yaml = serde_yaml::to_string(&manifest).map_err(|e| {
            FeedsweepError::BackupCreationFailed {
                reason: format!("failed to serialize manifest: {}", e),
            }
        })?;
        let manifest_path = staging.path().join(MANIFEST_FILE);
        fs::write(&manifest_path, manifest_yaml).map_err(|e| creation_failed(&manifest_path, e))?;

        fs::rename(staging.path(), &final_dir).map_err(|e| creation_failed(&final_dir, e))?;
        // The staging TempDir now points at a moved-away path; its drop
        // cleanup is a no-op. On any earlier error it removes the partial
        // staging directory instead.

        Ok(manifest)
    }

    /// Backup summaries, newest first
    pub fn list_backups(&self) -> Result<Vec<BackupSummary>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }

        let mut summaries = Vec::new();
        let entries =
            fs::read_dir(&self.backups_dir).map_err(|e| FeedsweepError::FileReadFailed {
                path: self.backups_dir.display().to_string(),
                reason: e.to_string(),
            })?;
        for entry in entries {
            let entry = entry.map_err(|e| FeedsweepError::FileReadFailed {
                path: self.backups_dir.display().to_string(),
                reason: e.to_string(),
            })?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            if !path.is_dir() || name.starts_with('.') {
                continue;
            }
            match self.load_manifest(&name) {
                Ok(manifest) => summaries.push(BackupSummary {
                    total_bytes: manifest.total_bytes(),
                    created_at: manifest.created_at,
                    artifact_count: manifest.artifacts.len(),
                    id: manifest.backup_id,
                }),
                Err(e) => {
                    eprintln!("Warning: skipping unreadable backup '{}': {}", name, e);
                }
            }
        }

        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(summaries)
    }

    /// Load the manifest of one backup unit
    pub fn load_manifest(&self, backup_id: &str) -> Result<BackupManifest> {
        let path = self.backups_dir.join(backup_id).join(MANIFEST_FILE);
        if !path.exists() {
            return Err(FeedsweepError::BackupNotFound {
                id: backup_id.to_string(),
            });
        }
        let content = fs::read_to_string(&path).map_err(|e| FeedsweepError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_yaml::from_str(&content).map_err(|e| FeedsweepError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Restore every artifact of a backup unit to its original relative path
    /// under the restore root, overwriting current content.
    ///
    /// All captured content is hash-verified before the first write so a
    /// corrupted unit never leaves a half-restored catalog. The backup is
    /// retained; restores are repeatable. Returns the number of artifacts
    /// written.
    pub fn restore_backup(&self, backup_id: &str) -> Result<usize> {
        let manifest = self.load_manifest(backup_id)?;
        let backup_dir = self.backups_dir.join(backup_id);

        // Verify pass: read and check every artifact before touching the
        // restore root.
        let mut contents = Vec::with_capacity(manifest.artifacts.len());
        for artifact in &manifest.artifacts {
            let captured = backup_dir.join(&artifact.path);
            let content = fs::read(&captured).map_err(|e| FeedsweepError::FileReadFailed {
                path: captured.display().to_string(),
                reason: e.to_string(),
            })?;
            if blake3::hash(&content).to_hex().to_string() != artifact.blake3 {
                return Err(FeedsweepError::BackupCorrupted {
                    id: backup_id.to_string(),
                    path: artifact.path.clone(),
                });
            }
            contents.push((artifact.path.clone(), content));
        }

        // Write pass.
        for (rel, content) in &contents {
            let dest = self.restore_root.join(rel);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent).map_err(|e| FeedsweepError::FileWriteFailed {
                    path: parent.display().to_string(),
                    reason: e.to_string(),
                })?;
            }
            fs::write(&dest, content).map_err(|e| FeedsweepError::FileWriteFailed {
                path: dest.display().to_string(),
                reason: e.to_string(),
            })?;
        }

        Ok(contents.len())
    }

    /// Delete a backup unit. Deleting an absent id is a no-op.
    pub fn delete_backup(&self, backup_id: &str) -> Result<()> {
        let path = self.backups_dir.join(backup_id);
        if !path.exists() {
            return Ok(());
        }
        fs::remove_dir_all(&path).map_err(|e| FeedsweepError::DeleteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Delete backups beyond the retention policy, oldest first.
    ///
    /// The most recent backup is always retained, even when it violates an
    /// age policy. Returns the deleted ids, oldest first.
    pub fn cleanup_old_backups(&self, policy: RetentionPolicy) -> Result<Vec<String>> {
        let newest_first = self.list_backups()?;
        let doomed = retention::select_for_deletion(&newest_first, &policy);

        let mut deleted = Vec::with_capacity(doomed.len());
        for id in doomed {
            self.delete_backup(&id)?;
            deleted.push(id);
        }
        Ok(deleted)
    }

    fn claim_backup_id(&self) -> (String, PathBuf) {
        loop {
            let id = Utc::now().format("%Y%m%d_%H%M%S_%6f").to_string();
            let dir = self.backups_dir.join(&id);
            if !dir.exists() {
                return (id, dir);
            }
        }
    }
}

fn creation_failed(path: &Path, err: std::io::Error) -> FeedsweepError {
    FeedsweepError::BackupCreationFailed {
        reason: format!("{}: {}", path.display(), err),
    }
}
