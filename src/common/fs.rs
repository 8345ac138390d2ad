//! Common file system operations with unified error handling

use std::fs;
use std::path::{Path, PathBuf};

use normpath::PathExt;
use walkdir::WalkDir;

use crate::error::{FeedsweepError, Result};

/// Canonicalize a path with fallbacks for paths that do not (yet) exist
pub fn canonicalize_with_fallback(path: &Path) -> PathBuf {
    path.canonicalize()
        .ok()
        .or_else(|| path.normalize().ok().map(|p| p.into_path_buf()))
        .unwrap_or_else(|| path.to_path_buf())
}

/// Write a file atomically (temp file + rename).
///
/// Readers never observe a partially written file: content is written to a
/// sibling `.tmp` file first and renamed into place.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let tmp_path = path.with_extension(match path.extension() {
        Some(ext) => format!("{}.tmp", ext.to_string_lossy()),
        None => "tmp".to_string(),
    });

    fs::write(&tmp_path, content).map_err(|e| FeedsweepError::FileWriteFailed {
        path: tmp_path.display().to_string(),
        reason: e.to_string(),
    })?;

    fs::rename(&tmp_path, path).map_err(|e| FeedsweepError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Calculate directory size recursively.
///
/// Entries that cannot be accessed (permissions, races with concurrent
/// deletion) are skipped with a warning rather than failing the whole scan.
pub fn dir_size(path: &Path) -> u64 {
    let mut size = 0u64;
    for entry in WalkDir::new(path).follow_links(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                eprintln!("Warning: skipping inaccessible entry under {}: {}", path.display(), e);
                continue;
            }
        };
        if entry.file_type().is_file() {
            match entry.metadata() {
                Ok(meta) => size += meta.len(),
                Err(e) => {
                    eprintln!(
                        "Warning: skipping unreadable file {}: {}",
                        entry.path().display(),
                        e
                    );
                }
            }
        }
    }
    size
}

/// Collect every file under a directory as (relative path, absolute path).
///
/// Relative paths are relative to `root`. Inaccessible entries are skipped
/// with a warning, same policy as [`dir_size`].
pub fn collect_files(root: &Path) -> Vec<(PathBuf, PathBuf)> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                eprintln!("Warning: skipping inaccessible entry under {}: {}", root.display(), e);
                continue;
            }
        };
        if entry.file_type().is_file() {
            if let Ok(rel) = entry.path().strip_prefix(root) {
                files.push((rel.to_path_buf(), entry.path().to_path_buf()));
            }
        }
    }
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_creates_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.yaml");
        atomic_write(&path, b"key: value\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "key: value\n");
        // No temp file left behind
        assert!(!temp.path().join("out.yaml.tmp").exists());
    }

    #[test]
    fn test_atomic_write_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.txt");
        fs::write(&path, "old").unwrap();
        atomic_write(&path, b"new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_dir_size() {
        let temp = TempDir::new().unwrap();
        let sub = temp.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(temp.path().join("a.txt"), b"hello").unwrap();
        fs::write(sub.join("b.txt"), b"world!").unwrap();
        assert_eq!(dir_size(temp.path()), 11);
    }

    #[test]
    fn test_dir_size_missing_dir_is_zero() {
        let temp = TempDir::new().unwrap();
        assert_eq!(dir_size(&temp.path().join("nope")), 0);
    }

    #[test]
    fn test_collect_files_relative_paths() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("a.txt"), b"a").unwrap();
        fs::write(temp.path().join("nested/b.txt"), b"b").unwrap();

        let files = collect_files(temp.path());
        let rels: Vec<String> = files
            .iter()
            .map(|(rel, _)| rel.to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(rels, vec!["a.txt", "nested/b.txt"]);
    }
}
