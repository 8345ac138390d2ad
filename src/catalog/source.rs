//! Source definition records
//!
//! A source is one content feed tracked by the catalog. Its definition lives
//! in a single file under the sources directory; the file stem is the source
//! id and the extension selects the on-disk format.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FeedsweepError, Result};

/// Supported definition file formats, in probe priority order.
///
/// The on-disk extension of an existing record is never assumed: callers
/// probe these in order and use the first existing match.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// On-disk format of a source definition file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Yaml,
    Yml,
    Json,
}

impl SourceFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            SourceFormat::Yaml => "yaml",
            SourceFormat::Yml => "yml",
            SourceFormat::Json => "json",
        }
    }

    /// Map a file extension to a format, if supported
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "yaml" => Some(SourceFormat::Yaml),
            "yml" => Some(SourceFormat::Yml),
            "json" => Some(SourceFormat::Json),
            _ => None,
        }
    }
}

/// Parsed body of a source definition file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceDefinition {
    /// Display name (falls back to the source id when absent)
    #[serde(default)]
    pub name: Option<String>,

    /// Free-form category, e.g. "tech" or "news"
    #[serde(default)]
    pub category: Option<String>,

    /// Discovery method, e.g. "rss" or "html"
    #[serde(default)]
    pub method: Option<String>,

    /// Feed or page URL
    #[serde(default)]
    pub url: Option<String>,
}

impl SourceDefinition {
    /// Parse a definition file according to its format
    pub fn load(path: &Path, format: SourceFormat) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| FeedsweepError::ConfigReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let parsed = match format {
            SourceFormat::Yaml | SourceFormat::Yml => serde_yaml::from_str(&content)
                .map_err(|e| FeedsweepError::ConfigParseFailed {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?,
            SourceFormat::Json => serde_json::from_str(&content).map_err(|e| {
                FeedsweepError::ConfigParseFailed {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                }
            })?,
        };

        Ok(parsed)
    }
}

/// A source record: identity plus the definition attributes
#[derive(Debug, Clone)]
pub struct SourceRecord {
    /// Unique, stable id (the definition file stem)
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-form category
    pub category: Option<String>,
    /// Discovery method
    pub method: Option<String>,
    /// Backing definition file
    pub path: PathBuf,
    /// Backing file format
    pub format: SourceFormat,
}

impl SourceRecord {
    /// Build a record from a definition file path
    pub fn from_path(path: &Path) -> Result<Option<Self>> {
        let ext = match path.extension().and_then(|e| e.to_str()) {
            Some(e) => e,
            None => return Ok(None),
        };
        let format = match SourceFormat::from_extension(ext) {
            Some(f) => f,
            None => return Ok(None),
        };
        let id = match path.file_stem().and_then(|s| s.to_str()) {
            Some(s) => s.to_string(),
            None => return Ok(None),
        };

        let definition = SourceDefinition::load(path, format)?;

        Ok(Some(SourceRecord {
            name: definition.name.unwrap_or_else(|| id.clone()),
            id,
            category: definition.category,
            method: definition.method,
            path: path.to_path_buf(),
            format,
        }))
    }
}
