//! Backup manifest serialization

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Manifest filename inside each backup directory
pub const MANIFEST_FILE: &str = "manifest.yaml";

/// One captured artifact in a backup unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactEntry {
    /// Logical name, e.g. "source:gizmodo" or "bundle:tech"
    pub name: String,
    /// Path relative to the catalog root, also the path inside the backup
    pub path: String,
    /// Captured size in bytes
    pub bytes: u64,
    /// blake3 hash of the captured content, verified on restore
    pub blake3: String,
}

/// Manifest describing what a backup unit captured
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupManifest {
    /// Unique backup id (timestamp-derived)
    pub backup_id: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Source ids the removal targeted
    #[serde(default)]
    pub sources: Vec<String>,
    /// Bundle ids captured because they referenced a targeted source
    #[serde(default)]
    pub bundles: Vec<String>,
    /// Whether derived output files were captured in this unit
    #[serde(default)]
    pub includes_output: bool,
    /// Captured artifacts
    #[serde(default)]
    pub artifacts: Vec<ArtifactEntry>,
}

impl BackupManifest {
    /// Total captured bytes across artifacts
    pub fn total_bytes(&self) -> u64 {
        self.artifacts.iter().map(|a| a.bytes).sum()
    }
}
