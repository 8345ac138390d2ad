//! Catalog of source definitions and the directory layout around it
//!
//! The catalog owns the configuration root and the directories derived from
//! it (sources, bundles, analytics, backups, output). It reads source
//! definition records and caches the listing; the cache is an explicit
//! object with an explicit [`Catalog::invalidate`] call, invoked by the
//! removal workflow after it mutates state, so reads never serve a stale
//! view after a deletion.

pub mod source;

use std::cell::RefCell;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FeedsweepError, Result};

pub use source::{SUPPORTED_EXTENSIONS, SourceDefinition, SourceFormat, SourceRecord};

/// Environment variable overriding the configuration root
pub const CONFIG_DIR_ENV: &str = "FEEDSWEEP_CONFIG_DIR";

/// Environment variable overriding the analytics directory
pub const ANALYTICS_DIR_ENV: &str = "FEEDSWEEP_ANALYTICS_DIR";

/// Environment variable overriding the backups directory
pub const BACKUP_DIR_ENV: &str = "FEEDSWEEP_BACKUP_DIR";

/// Environment variable overriding the output directory
pub const OUTPUT_DIR_ENV: &str = "FEEDSWEEP_OUTPUT_DIR";

/// The catalog: directory layout plus a cached view of the source records
#[derive(Debug)]
pub struct Catalog {
    /// Configuration root
    pub root: PathBuf,
    /// Source definition files, one per source
    pub sources_dir: PathBuf,
    /// Bundle records, one per bundle
    pub bundles_dir: PathBuf,
    /// Per-source fetch history blobs
    pub analytics_dir: PathBuf,
    /// Backup units
    pub backups_dir: PathBuf,
    /// Derived output directories written by external fetch runs
    pub output_dir: PathBuf,

    cache: RefCell<Option<Vec<SourceRecord>>>,
}

/// Resolve the configuration root: flag, then env, then user config dir
fn resolve_config_root(config_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = config_dir {
        return Ok(dir);
    }
    if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    dirs::config_dir()
        .map(|d| d.join("feedsweep"))
        .ok_or(FeedsweepError::NoConfigDir)
}

fn env_dir_or(env_var: &str, default: PathBuf) -> PathBuf {
    match env::var(env_var) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => default,
    }
}

impl Catalog {
    /// Open the catalog rooted at the resolved configuration directory
    pub fn open(config_dir: Option<PathBuf>, output_dir: Option<PathBuf>) -> Result<Self> {
        let root = resolve_config_root(config_dir)?;

        let output_dir = match output_dir {
            Some(dir) => dir,
            None => env_dir_or(OUTPUT_DIR_ENV, root.join("output")),
        };

        Ok(Catalog {
            sources_dir: root.join("sources"),
            bundles_dir: root.join("bundles"),
            analytics_dir: env_dir_or(ANALYTICS_DIR_ENV, root.join("analytics")),
            backups_dir: env_dir_or(BACKUP_DIR_ENV, root.join("backups")),
            output_dir,
            root,
            cache: RefCell::new(None),
        })
    }

    /// All source records, loaded once and served from the cache until
    /// [`Catalog::invalidate`] is called.
    ///
    /// Definition files that fail to parse are skipped with a warning so a
    /// single broken record does not hide the rest of the catalog.
    pub fn sources(&self) -> Result<Vec<SourceRecord>> {
        if let Some(ref cached) = *self.cache.borrow() {
            return Ok(cached.clone());
        }

        let records = self.scan_sources()?;
        *self.cache.borrow_mut() = Some(records.clone());
        Ok(records)
    }

    /// Look up a single source by id
    pub fn get_source(&self, id: &str) -> Result<Option<SourceRecord>> {
        Ok(self.sources()?.into_iter().find(|s| s.id == id))
    }

    /// Drop the cached source listing so the next read hits the disk
    pub fn invalidate(&self) {
        *self.cache.borrow_mut() = None;
    }

    /// Probe the supported extension set, in priority order, for an existing
    /// definition file of `source_id`.
    ///
    /// Returns `None` when no definition exists under any supported
    /// extension; the caller treats that as already absent rather than
    /// guessing a default extension.
    pub fn resolve_definition_path(&self, source_id: &str) -> Option<PathBuf> {
        for ext in SUPPORTED_EXTENSIONS {
            let candidate = self.sources_dir.join(format!("{}.{}", source_id, ext));
            if candidate.exists() {
                return Some(candidate);
            }
        }
        None
    }

    fn scan_sources(&self) -> Result<Vec<SourceRecord>> {
        if !self.sources_dir.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in read_dir(&self.sources_dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            match SourceRecord::from_path(&path) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => {
                    eprintln!("Warning: skipping unreadable source definition: {}", e);
                }
            }
        }
        records.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(records)
    }
}

fn read_dir(path: &Path) -> Result<fs::ReadDir> {
    fs::read_dir(path).map_err(|e| FeedsweepError::ConfigReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
