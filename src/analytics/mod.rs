//! Usage analytics and removal recommendations
//!
//! Persists a bounded fetch-outcome history per source and derives removal
//! recommendations from it. The history is owned exclusively by this module;
//! the fetch collaborator pushes outcomes in through [`AnalyticsStore::record_fetch`]
//! and the removal workflow reads verdicts out, never the raw blobs.

pub mod recommend;

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::fs::atomic_write;
use crate::error::{FeedsweepError, Result};

pub use recommend::{Recommendation, RecommendationConfig};

/// Per-source history is trimmed to this many most-recent outcomes
pub const MAX_HISTORY: usize = 30;

/// One recorded fetch attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchOutcome {
    /// When the attempt happened
    pub timestamp: DateTime<Utc>,
    /// Whether the fetch succeeded
    pub success: bool,
    /// Error classification for failed attempts, e.g. "timeout" or "parse"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

/// Persisted history blob, one JSON file per source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct FetchHistory {
    #[serde(default)]
    outcomes: Vec<FetchOutcome>,
}

/// Aggregate statistics for one source
#[derive(Debug, Clone)]
pub struct SourceStats {
    /// Total recorded attempts (bounded by [`MAX_HISTORY`])
    pub attempts: usize,
    /// Successful attempts
    pub successes: usize,
    /// successes / attempts, 0.0 when nothing is recorded
    pub success_rate: f64,
    /// Whole days since the most recent attempt
    pub days_since_last: Option<i64>,
    /// Whole days since the oldest tracked attempt
    pub days_since_first: Option<i64>,
}

/// File-backed store of per-source fetch histories
#[derive(Debug)]
pub struct AnalyticsStore {
    dir: PathBuf,
}

impl AnalyticsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn history_path(&self, source_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", source_id))
    }

    /// Record one fetch outcome for a source, evicting the oldest entry once
    /// the history holds [`MAX_HISTORY`] outcomes.
    pub fn record_fetch(
        &self,
        source_id: &str,
        success: bool,
        error_kind: Option<&str>,
    ) -> Result<()> {
        self.record_outcome(
            source_id,
            FetchOutcome {
                timestamp: Utc::now(),
                success,
                error_kind: error_kind.map(str::to_string),
            },
        )
    }

    fn record_outcome(&self, source_id: &str, outcome: FetchOutcome) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| FeedsweepError::FileWriteFailed {
            path: self.dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut history = self.load_history_blob(source_id)?;
        history.outcomes.push(outcome);
        if history.outcomes.len() > MAX_HISTORY {
            let excess = history.outcomes.len() - MAX_HISTORY;
            history.outcomes.drain(..excess);
        }

        let path = self.history_path(source_id);
        let content =
            serde_json::to_vec_pretty(&history).map_err(|e| FeedsweepError::ConfigParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        atomic_write(&path, &content)
    }

    /// All recorded outcomes for a source, oldest first
    pub fn load_history(&self, source_id: &str) -> Result<Vec<FetchOutcome>> {
        Ok(self.load_history_blob(source_id)?.outcomes)
    }

    fn load_history_blob(&self, source_id: &str) -> Result<FetchHistory> {
        let path = self.history_path(source_id);
        if !path.exists() {
            return Ok(FetchHistory::default());
        }
        let content = fs::read_to_string(&path).map_err(|e| FeedsweepError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| FeedsweepError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Aggregate statistics for a source. Sources with no recorded attempts
    /// yield zero counts and no age figures.
    pub fn get_stats(&self, source_id: &str) -> Result<SourceStats> {
        let outcomes = self.load_history(source_id)?;
        Ok(stats_from_outcomes(&outcomes, Utc::now()))
    }

    /// Removal recommendation for a source, evaluated in priority order:
    /// never-used, stale, low-success, active.
    pub fn get_removal_recommendation(
        &self,
        source_id: &str,
        config: &RecommendationConfig,
    ) -> Result<Recommendation> {
        let stats = self.get_stats(source_id)?;
        Ok(recommend::evaluate(&stats, config))
    }

    /// Ids from `source_ids` with zero recorded fetch attempts
    pub fn get_unused_sources(&self, source_ids: &[String]) -> Result<Vec<String>> {
        let mut unused = Vec::new();
        for id in source_ids {
            if self.get_stats(id)?.attempts == 0 {
                unused.push(id.clone());
            }
        }
        Ok(unused)
    }

    /// Ids from `source_ids` whose recommendation is low-success
    pub fn get_low_performing_sources(
        &self,
        source_ids: &[String],
        config: &RecommendationConfig,
    ) -> Result<Vec<String>> {
        let mut low = Vec::new();
        for id in source_ids {
            let verdict = self.get_removal_recommendation(id, config)?;
            if matches!(verdict, Recommendation::LowSuccess { .. }) {
                low.push(id.clone());
            }
        }
        Ok(low)
    }

    /// Delete the history blob for a source (no-op when absent)
    pub fn delete_history(&self, source_id: &str) -> Result<()> {
        let path = self.history_path(source_id);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| FeedsweepError::DeleteFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}

fn stats_from_outcomes(outcomes: &[FetchOutcome], now: DateTime<Utc>) -> SourceStats {
    let attempts = outcomes.len();
    let successes = outcomes.iter().filter(|o| o.success).count();
    let success_rate = if attempts == 0 {
        0.0
    } else {
        successes as f64 / attempts as f64
    };

    let days_since_last = outcomes
        .last()
        .map(|o| (now - o.timestamp).num_days());
    let days_since_first = outcomes
        .first()
        .map(|o| (now - o.timestamp).num_days());

    SourceStats {
        attempts,
        successes,
        success_rate,
        days_since_last,
        days_since_first,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    fn outcome(days_ago: i64, success: bool) -> FetchOutcome {
        FetchOutcome {
            timestamp: Utc::now() - Duration::days(days_ago),
            success,
            error_kind: if success { None } else { Some("timeout".to_string()) },
        }
    }

    #[test]
    fn test_record_and_stats() {
        let temp = TempDir::new().unwrap();
        let store = AnalyticsStore::new(temp.path());

        store.record_fetch("gizmodo", true, None).unwrap();
        store.record_fetch("gizmodo", false, Some("timeout")).unwrap();
        store.record_fetch("gizmodo", true, None).unwrap();

        let stats = store.get_stats("gizmodo").unwrap();
        assert_eq!(stats.attempts, 3);
        assert_eq!(stats.successes, 2);
        assert!((stats.success_rate - 2.0 / 3.0).abs() < f64::EPSILON);
        assert_eq!(stats.days_since_last, Some(0));
    }

    #[test]
    fn test_history_never_exceeds_bound() {
        let temp = TempDir::new().unwrap();
        let store = AnalyticsStore::new(temp.path());

        for i in 0..MAX_HISTORY + 5 {
            store
                .record_fetch("feed", i % 2 == 0, None)
                .unwrap();
            let len = store.load_history("feed").unwrap().len();
            assert_eq!(len, (i + 1).min(MAX_HISTORY));
        }
    }

    #[test]
    fn test_eviction_drops_oldest_first() {
        let temp = TempDir::new().unwrap();
        let store = AnalyticsStore::new(temp.path());

        // First entry fails, everything after succeeds. Once the bound is
        // hit, the failing entry is the one that must be gone.
        store.record_fetch("feed", false, Some("dns")).unwrap();
        for _ in 0..MAX_HISTORY {
            store.record_fetch("feed", true, None).unwrap();
        }

        let history = store.load_history("feed").unwrap();
        assert_eq!(history.len(), MAX_HISTORY);
        assert!(history.iter().all(|o| o.success));
    }

    #[test]
    fn test_persistence_survives_reopen() {
        let temp = TempDir::new().unwrap();
        {
            let store = AnalyticsStore::new(temp.path());
            store.record_fetch("feed", true, None).unwrap();
            store.record_fetch("feed", false, Some("http-500")).unwrap();
        }

        let reopened = AnalyticsStore::new(temp.path());
        let stats = reopened.get_stats("feed").unwrap();
        assert_eq!(stats.attempts, 2);
        assert_eq!(stats.successes, 1);

        let history = reopened.load_history("feed").unwrap();
        assert_eq!(history[1].error_kind.as_deref(), Some("http-500"));
    }

    #[test]
    fn test_untracked_source_has_zero_stats() {
        let temp = TempDir::new().unwrap();
        let store = AnalyticsStore::new(temp.path());

        let stats = store.get_stats("ghost").unwrap();
        assert_eq!(stats.attempts, 0);
        assert_eq!(stats.success_rate, 0.0);
        assert_eq!(stats.days_since_last, None);
        assert_eq!(stats.days_since_first, None);
    }

    #[test]
    fn test_unused_scan() {
        let temp = TempDir::new().unwrap();
        let store = AnalyticsStore::new(temp.path());
        store.record_fetch("used", true, None).unwrap();

        let ids = vec!["used".to_string(), "never".to_string()];
        assert_eq!(store.get_unused_sources(&ids).unwrap(), vec!["never"]);
    }

    #[test]
    fn test_low_performing_scan() {
        let temp = TempDir::new().unwrap();
        let store = AnalyticsStore::new(temp.path());

        for _ in 0..10 {
            store.record_fetch("flaky", false, Some("timeout")).unwrap();
        }
        for _ in 0..10 {
            store.record_fetch("solid", true, None).unwrap();
        }

        let ids = vec!["flaky".to_string(), "solid".to_string()];
        let config = RecommendationConfig::default();
        assert_eq!(
            store.get_low_performing_sources(&ids, &config).unwrap(),
            vec!["flaky"]
        );
    }

    #[test]
    fn test_delete_history_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let store = AnalyticsStore::new(temp.path());
        store.record_fetch("feed", true, None).unwrap();

        store.delete_history("feed").unwrap();
        assert_eq!(store.get_stats("feed").unwrap().attempts, 0);
        // Absent blob is a no-op
        store.delete_history("feed").unwrap();
    }

    #[test]
    fn test_stats_from_backdated_outcomes() {
        let outcomes = vec![outcome(20, true), outcome(10, false), outcome(5, true)];
        let stats = stats_from_outcomes(&outcomes, Utc::now());
        assert_eq!(stats.days_since_last, Some(5));
        assert_eq!(stats.days_since_first, Some(20));
    }
}
