//! Removal recommendation verdicts
//!
//! A verdict always carries the computed evidence so callers can render a
//! justification, not just a label.

use super::SourceStats;

/// Thresholds for the recommendation verdicts
#[derive(Debug, Clone)]
pub struct RecommendationConfig {
    /// A source whose most recent attempt is older than this is stale
    pub stale_after_days: i64,
    /// Success rate below this marks a source low-success
    pub min_success_rate: f64,
    /// Minimum attempts before the success rate is judged at all
    pub min_samples: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            stale_after_days: 60,
            min_success_rate: 0.3,
            min_samples: 5,
        }
    }
}

/// Removal recommendation for one source
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    /// Zero recorded fetch attempts ever
    NeverUsed,
    /// No activity for longer than the configured staleness threshold
    Stale {
        days_since_last: i64,
        threshold_days: i64,
    },
    /// Success rate below threshold over a sufficient sample
    LowSuccess {
        success_rate: f64,
        attempts: usize,
        threshold: f64,
    },
    /// Healthy; removal is not recommended
    Active {
        success_rate: f64,
        days_since_last: i64,
    },
}

impl Recommendation {
    /// Short verdict label for display
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::NeverUsed => "never-used",
            Recommendation::Stale { .. } => "stale",
            Recommendation::LowSuccess { .. } => "low-success",
            Recommendation::Active { .. } => "active",
        }
    }

    /// Whether this verdict marks the source a removal candidate
    pub fn is_removal_candidate(&self) -> bool {
        !matches!(self, Recommendation::Active { .. })
    }

    /// One-line human-readable justification
    pub fn evidence(&self) -> String {
        match self {
            Recommendation::NeverUsed => "no fetch attempts recorded".to_string(),
            Recommendation::Stale {
                days_since_last,
                threshold_days,
            } => format!(
                "last attempt {} days ago (threshold {} days)",
                days_since_last, threshold_days
            ),
            Recommendation::LowSuccess {
                success_rate,
                attempts,
                threshold,
            } => format!(
                "{:.0}% success over {} attempts (threshold {:.0}%)",
                success_rate * 100.0,
                attempts,
                threshold * 100.0
            ),
            Recommendation::Active {
                success_rate,
                days_since_last,
            } => format!(
                "{:.0}% success, last attempt {} days ago",
                success_rate * 100.0,
                days_since_last
            ),
        }
    }
}

/// Evaluate the verdicts in priority order:
/// never-used, then stale, then low-success, then active.
pub fn evaluate(stats: &SourceStats, config: &RecommendationConfig) -> Recommendation {
    if stats.attempts == 0 {
        return Recommendation::NeverUsed;
    }

    // attempts > 0 implies a last timestamp exists
    let days_since_last = stats.days_since_last.unwrap_or(0);
    if days_since_last > config.stale_after_days {
        return Recommendation::Stale {
            days_since_last,
            threshold_days: config.stale_after_days,
        };
    }

    if stats.attempts >= config.min_samples && stats.success_rate < config.min_success_rate {
        return Recommendation::LowSuccess {
            success_rate: stats.success_rate,
            attempts: stats.attempts,
            threshold: config.min_success_rate,
        };
    }

    Recommendation::Active {
        success_rate: stats.success_rate,
        days_since_last,
    }
}
