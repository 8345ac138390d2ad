//! Derived-output discovery and purging
//!
//! Output directories are written by external fetch runs and named after the
//! source, usually with a date suffix (`gizmodo-2026-08-01`). Correlation
//! matches a directory against both the source id and its display name,
//! case-insensitively, tolerating such suffixes. A directory that cannot be
//! confidently correlated to the source is never included in that source's
//! purge scope.

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::SourceRecord;
use crate::common::fs::dir_size;

/// A candidate output directory correlated to one source
#[derive(Debug, Clone)]
pub struct OutputDir {
    pub path: PathBuf,
    pub bytes: u64,
}

/// Normalize a name for correlation: lowercase, alphanumeric runs joined
/// with single dashes.
fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Whether `remainder` looks like a date/run suffix (digits and dashes only)
fn is_date_suffix(remainder: &str) -> bool {
    !remainder.is_empty() && remainder.chars().all(|c| c.is_ascii_digit() || c == '-')
}

fn matches_key(normalized_dir: &str, key: &str) -> bool {
    if key.is_empty() {
        return false;
    }
    if normalized_dir == key {
        return true;
    }
    match normalized_dir.strip_prefix(key) {
        Some(rest) => rest
            .strip_prefix('-')
            .is_some_and(is_date_suffix),
        None => false,
    }
}

/// Whether a directory name correlates to the given id / display name
pub fn correlates(dir_name: &str, source_id: &str, display_name: Option<&str>) -> bool {
    let normalized = normalize(dir_name);
    if matches_key(&normalized, &normalize(source_id)) {
        return true;
    }
    match display_name {
        Some(name) => matches_key(&normalized, &normalize(name)),
        None => false,
    }
}

/// Output directories correlated to a source, with recursively computed
/// sizes. Inaccessible files are skipped with a warning during sizing.
pub fn discover(
    output_root: &Path,
    source_id: &str,
    display_name: Option<&str>,
) -> Vec<OutputDir> {
    let entries = match fs::read_dir(output_root) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut dirs = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if correlates(&name, source_id, display_name) {
            let bytes = dir_size(&path);
            dirs.push(OutputDir { path, bytes });
        }
    }
    dirs.sort_by(|a, b| a.path.cmp(&b.path));
    dirs
}

/// Output directories correlated to no currently known source.
///
/// This only feeds the presentation layer's orphan report; orphans are never
/// auto-included in a specific removal's purge scope.
pub fn find_orphans(output_root: &Path, sources: &[SourceRecord]) -> Vec<PathBuf> {
    let entries = match fs::read_dir(output_root) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut orphans = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        let claimed = sources
            .iter()
            .any(|s| correlates(&name, &s.id, Some(&s.name)));
        if !claimed {
            orphans.push(path);
        }
    }
    orphans.sort();
    orphans
}
