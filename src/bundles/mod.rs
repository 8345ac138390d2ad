//! Bundle records and membership editing
//!
//! A bundle is a named group referencing zero or more sources. Its record is
//! a YAML file whose `sources:` block lists member ids, but the file also
//! carries content that is not semantically part of membership: the
//! description, comments, blank lines, and the ordering of the remaining
//! members. Edits are line-surgical: only the targeted membership line is
//! excised, everything else passes through byte-for-byte. A generic
//! parse-and-redump would lose comments, so the record is never round-tripped
//! through a serializer on write.

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::fs::atomic_write;
use crate::error::{FeedsweepError, Result};

/// A bundle record held as raw lines for surgical edits
#[derive(Debug, Clone)]
pub struct BundleFile {
    /// Bundle id (the record file stem)
    pub id: String,
    /// Backing record file
    pub path: PathBuf,
    lines: Vec<String>,
    had_trailing_newline: bool,
}

impl BundleFile {
    /// Load a bundle record from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| FeedsweepError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        Ok(BundleFile {
            id,
            path: path.to_path_buf(),
            had_trailing_newline: content.ends_with('\n'),
            lines: content.lines().map(str::to_string).collect(),
        })
    }

    /// Member source ids in record order
    pub fn members(&self) -> Vec<String> {
        self.member_lines()
            .into_iter()
            .map(|(_, id)| id)
            .collect()
    }

    /// Free-form description, when the record has one
    pub fn description(&self) -> Option<String> {
        self.lines.iter().find_map(|line| {
            line.strip_prefix("description:")
                .map(|rest| rest.trim().to_string())
        })
    }

    /// Remove a member line. Returns whether the record changed; removing an
    /// absent member is a no-op, never an error.
    pub fn remove_member(&mut self, source_id: &str) -> bool {
        match self
            .member_lines()
            .into_iter()
            .find(|(_, id)| id == source_id)
        {
            Some((index, _)) => {
                self.lines.remove(index);
                true
            }
            None => false,
        }
    }

    /// Write the record back, preserving every untouched line
    pub fn save(&self) -> Result<()> {
        let mut content = self.lines.join("\n");
        if self.had_trailing_newline || !content.is_empty() {
            content.push('\n');
        }
        atomic_write(&self.path, content.as_bytes())
    }

    /// (line index, member id) pairs inside the `sources:` block.
    ///
    /// The block runs from the `sources:` key to the next top-level key.
    /// Comments and blank lines inside the block belong to the block and are
    /// never treated as members.
    fn member_lines(&self) -> Vec<(usize, String)> {
        let mut members = Vec::new();
        let mut in_sources = false;

        for (index, line) in self.lines.iter().enumerate() {
            let trimmed = line.trim_start();

            if !line.starts_with([' ', '\t'])
                && !trimmed.is_empty()
                && !trimmed.starts_with('#')
                && !trimmed.starts_with('-')
            {
                in_sources = trimmed.starts_with("sources:");
                continue;
            }

            if !in_sources {
                continue;
            }

            if let Some(rest) = trimmed.strip_prefix('-') {
                // Strip a trailing comment, then unquote
                let entry = rest.split('#').next().unwrap_or("").trim();
                let entry = entry.trim_matches(|c| c == '"' || c == '\'');
                if !entry.is_empty() {
                    members.push((index, entry.to_string()));
                }
            }
        }

        members
    }
}

/// Load every bundle record under `bundles_dir`, sorted by id
pub fn load_all(bundles_dir: &Path) -> Result<Vec<BundleFile>> {
    if !bundles_dir.exists() {
        return Ok(Vec::new());
    }

    let mut bundles = Vec::new();
    let entries = fs::read_dir(bundles_dir).map_err(|e| FeedsweepError::ConfigReadFailed {
        path: bundles_dir.display().to_string(),
        reason: e.to_string(),
    })?;
    for entry in entries {
        let path = entry
            .map_err(|e| FeedsweepError::ConfigReadFailed {
                path: bundles_dir.display().to_string(),
                reason: e.to_string(),
            })?
            .path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("yaml") {
            bundles.push(BundleFile::load(&path)?);
        }
    }
    bundles.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(bundles)
}

/// Remove a member from one bundle. Absent member (or absent record line) is
/// an idempotent success; an unknown bundle id is an error.
pub fn remove_source_from_bundle(
    bundles_dir: &Path,
    bundle_id: &str,
    source_id: &str,
) -> Result<bool> {
    let path = bundles_dir.join(format!("{}.yaml", bundle_id));
    if !path.exists() {
        return Err(FeedsweepError::BundleNotFound {
            id: bundle_id.to_string(),
        });
    }

    let mut bundle = BundleFile::load(&path)?;
    if bundle.remove_member(source_id) {
        bundle.save()?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Detach a source from every bundle that lists it. Returns the ids of the
/// bundles that were actually modified, for the removal report.
pub fn remove_source_from_all_bundles(bundles_dir: &Path, source_id: &str) -> Result<Vec<String>> {
    let mut modified = Vec::new();
    for mut bundle in load_all(bundles_dir)? {
        if bundle.remove_member(source_id) {
            bundle.save()?;
            modified.push(bundle.id);
        }
    }
    Ok(modified)
}

/// Ids of bundles whose membership lists contain `source_id`
pub fn bundles_containing(bundles_dir: &Path, source_id: &str) -> Result<Vec<String>> {
    Ok(load_all(bundles_dir)?
        .into_iter()
        .filter(|b| b.members().iter().any(|m| m == source_id))
        .map(|b| b.id)
        .collect())
}

/// (bundle id, member id) pairs whose member id has no record in the catalog.
///
/// Dangling references are reported to the caller, never silently dropped
/// from the record.
pub fn find_dangling(bundles_dir: &Path, known_source_ids: &[String]) -> Result<Vec<(String, String)>> {
    let mut dangling = Vec::new();
    for bundle in load_all(bundles_dir)? {
        for member in bundle.members() {
            if !known_source_ids.iter().any(|id| *id == member) {
                dangling.push((bundle.id.clone(), member));
            }
        }
    }
    Ok(dangling)
}
