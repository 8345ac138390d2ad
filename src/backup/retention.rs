//! Backup retention policy

use chrono::{Duration, Utc};

use super::BackupSummary;

/// Which backups to keep during cleanup
#[derive(Debug, Clone, Copy)]
pub enum RetentionPolicy {
    /// Keep the newest N backups
    KeepCount(usize),
    /// Keep backups newer than N days
    MaxAgeDays(i64),
}

/// Ids to delete under the policy, oldest first.
///
/// `newest_first` is the ordering produced by `list_backups`. The newest
/// backup is never selected, whatever the policy says: a cleanup must not
/// leave the store without a restore point.
pub fn select_for_deletion(newest_first: &[BackupSummary], policy: &RetentionPolicy) -> Vec<String> {
    let mut doomed: Vec<String> = match policy {
        RetentionPolicy::KeepCount(count) => {
            let keep = (*count).max(1);
            newest_first.iter().skip(keep).map(|s| s.id.clone()).collect()
        }
        RetentionPolicy::MaxAgeDays(days) => {
            let cutoff = Utc::now() - Duration::days(*days);
            newest_first
                .iter()
                .skip(1)
                .filter(|s| s.created_at < cutoff)
                .map(|s| s.id.clone())
                .collect()
        }
    };
    doomed.reverse();
    doomed
}
