//! Common test utilities for Feedsweep integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// A test catalog for integration tests
#[allow(dead_code)]
pub struct TestCatalog {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to the catalog root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestCatalog {
    /// Create a new empty test catalog
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a source definition file
    pub fn write_source(&self, filename: &str, content: &str) {
        self.write_file(&format!("sources/{}", filename), content);
    }

    /// Write a bundle record file
    pub fn write_bundle(&self, bundle_id: &str, content: &str) {
        self.write_file(&format!("bundles/{}.yaml", bundle_id), content);
    }

    /// Create an output directory with one file in it
    pub fn write_output(&self, dir_name: &str, file: &str, content: &str) {
        self.write_file(&format!("output/{}/{}", dir_name, file), content);
    }

    /// Write a file under the catalog root
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the catalog root
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists under the catalog root
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Ids of stored backups (directory names under backups/)
    pub fn backup_ids(&self) -> Vec<String> {
        let backups_dir = self.path.join("backups");
        if !backups_dir.exists() {
            return Vec::new();
        }
        let mut ids: Vec<String> = std::fs::read_dir(&backups_dir)
            .expect("Failed to read backups directory")
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .filter(|name| !name.starts_with('.'))
            .collect();
        ids.sort();
        ids
    }
}

impl Default for TestCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a feedsweep command pointed at the given test catalog
pub fn feedsweep_cmd(catalog: &TestCatalog) -> assert_cmd::Command {
    let mut cmd =
        assert_cmd::Command::cargo_bin("feedsweep").expect("Failed to find feedsweep binary");
    cmd.env("FEEDSWEEP_CONFIG_DIR", &catalog.path)
        .env_remove("FEEDSWEEP_OUTPUT_DIR")
        .env_remove("FEEDSWEEP_ANALYTICS_DIR")
        .env_remove("FEEDSWEEP_BACKUP_DIR");
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_creation() {
        let catalog = TestCatalog::new();
        assert!(catalog.path.exists());
    }

    #[test]
    fn test_catalog_file_operations() {
        let catalog = TestCatalog::new();
        catalog.write_source("gizmodo.yaml", "name: Gizmodo\n");
        assert!(catalog.file_exists("sources/gizmodo.yaml"));
        assert_eq!(catalog.read_file("sources/gizmodo.yaml"), "name: Gizmodo\n");
    }
}
